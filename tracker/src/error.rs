use regatta_core::RegistryError;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to load settings"))]
    Settings {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: config::ConfigError,
    },
    #[snafu(display("Failed to create the share feed client"))]
    ShareFeed {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: share_feed::Error,
    },
    #[snafu(display("Failed to register vessel '{name}'"))]
    Registry {
        #[snafu(implicit)]
        location: Location,
        name: String,
        #[snafu(source)]
        error: RegistryError,
    },
}
