use std::time::Duration;

use reqwest::{Client, IntoUrl, header::HeaderMap};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::{RequestBuilder, Result};

#[derive(Debug, Clone)]
pub struct HttpClient(ClientWithMiddleware);

#[derive(Default, Debug)]
pub struct HttpClientBuilder {
    client: reqwest::ClientBuilder,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::new_with(Client::new())
    }

    fn new_with(inner: Client) -> Self {
        let client = ClientBuilder::new(inner)
            .with(TracingMiddleware::default())
            .build();

        Self(client)
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.0.get(url))
    }
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    pub fn gzip(mut self, enable: bool) -> Self {
        self.client = self.client.gzip(enable);
        self
    }

    /// Keeps cookies set by the server across requests made with the built client.
    pub fn cookie_store(mut self, enable: bool) -> Self {
        self.client = self.client.cookie_store(enable);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.client = self.client.default_headers(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let inner = self.client.build()?;
        Ok(HttpClient::new_with(inner))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
