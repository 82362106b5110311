use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use http::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use http_client::{HttpClient, StatusCode, Url};
use regatta_core::{
    Coordinate, FetchError, Fix, PositionSource,
    fetch_error::{NetworkSnafu, RateLimitedSnafu, StatusSnafu, TimeoutSnafu},
};
use serde::Deserialize;
use snafu::ResultExt;
use tracing::{debug, instrument};

use crate::{
    Result,
    error::error::{InvalidBaseUrlSnafu, InvalidHeaderSnafu},
    parse_last_track, parse_share_feed,
};

static DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct ShareFeedSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Share feed client keeping one HTTP session, with its own cookies, per share id.
#[derive(Debug)]
pub struct ShareFeed {
    base_url: String,
    timeout: Duration,
    headers: HeaderMap,
    sessions: Mutex<HashMap<String, HttpClient>>,
}

impl ShareFeed {
    pub fn new(settings: &ShareFeedSettings) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/');
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return InvalidBaseUrlSnafu { url: base_url }.fail(),
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent).context(InvalidHeaderSnafu {
                header: "user-agent",
            })?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        Ok(Self {
            base_url: base_url.to_string(),
            timeout: settings.timeout,
            headers,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    pub fn feed_url(&self, share_id: &str) -> String {
        format!("{}/Feed/Share/{share_id}", self.base_url)
    }

    pub fn track_url(&self, share_id: &str) -> String {
        format!("{}/Feed/LastTrack/{share_id}", self.base_url)
    }

    fn session(&self, share_id: &str, url: &str) -> std::result::Result<HttpClient, FetchError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = sessions.get(share_id) {
            return Ok(client.clone());
        }

        let client = HttpClient::builder()
            .timeout(self.timeout)
            .gzip(true)
            .cookie_store(true)
            .default_headers(self.headers.clone())
            .build()
            .map_err(|e| {
                NetworkSnafu {
                    url,
                    reason: describe(&e),
                }
                .build()
            })?;

        debug!(share_id, "opened share feed session");
        sessions.insert(share_id.to_string(), client.clone());
        Ok(client)
    }

    async fn download(&self, share_id: &str, url: &str) -> std::result::Result<String, FetchError> {
        let client = self.session(share_id, url)?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        response.text().await.map_err(|e| classify(url, e))
    }
}

#[async_trait]
impl PositionSource for ShareFeed {
    #[instrument(skip(self))]
    async fn latest_fix(&self, share_id: &str) -> std::result::Result<Fix, FetchError> {
        let url = self.feed_url(share_id);
        let body = self.download(share_id, &url).await?;
        let fix = parse_share_feed(&url, &body)?;
        debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            timestamp = %fix.timestamp,
            "received fix"
        );
        Ok(fix)
    }

    #[instrument(skip(self))]
    async fn last_track(&self, share_id: &str) -> std::result::Result<Vec<Coordinate>, FetchError> {
        let url = self.track_url(share_id);
        let body = self.download(share_id, &url).await?;
        parse_last_track(&url, &body)
    }
}

fn classify(url: &str, error: http_client::Error) -> FetchError {
    match &error {
        http_client::Error::FailedRequest { status, .. }
            if *status == StatusCode::TOO_MANY_REQUESTS =>
        {
            RateLimitedSnafu { url }.build()
        }
        http_client::Error::FailedRequest { status, body, .. } => StatusSnafu {
            url,
            status: status.as_u16(),
            body: body.as_str(),
        }
        .build(),
        _ if error.is_timeout() => TimeoutSnafu { url }.build(),
        _ => NetworkSnafu {
            url,
            reason: describe(&error),
        }
        .build(),
    }
}

fn describe(error: &dyn std::error::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(e) = source {
        description.push_str(": ");
        description.push_str(&e.to_string());
        source = e.source();
    }
    description
}
