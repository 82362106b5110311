use std::{num::NonZeroUsize, time::Duration};

use config::{Config, ConfigError, File};
use regatta_core::{ColorPolicy, FetchSettings, ReferencePoint};
use serde::Deserialize;
use share_feed::ShareFeedSettings;
use strum::{AsRefStr, EnumString};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub provider: ShareFeedSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,
    pub history_length: NonZeroUsize,
    #[serde(default)]
    pub color_policy: ColorPolicy,
    #[serde(default)]
    pub reference_point: ReferencePoint,
    pub proximity_radius_nm: f64,
    pub vessels: Vec<VesselSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VesselSettings {
    pub name: String,
    pub share_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Local,
    Test,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|e| e.parse().ok())
            .unwrap_or(Environment::Local);

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_ref().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("REGATTA_TRACKER").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }

    /// Installs the global tracing subscriber, `RUST_LOG` takes precedence over `log_level`.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_ref()));

        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
