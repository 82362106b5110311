use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum FetchError {
    #[snafu(display("Provider rate limited the request, url: '{url}'"))]
    RateLimited {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("Request timed out, url: '{url}'"))]
    Timeout {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("Network error, url: '{url}', reason: '{reason}'"))]
    Network {
        #[snafu(implicit)]
        location: Location,
        url: String,
        reason: String,
    },
    #[snafu(display("Unexpected status '{status}', url: '{url}', body: '{body}'"))]
    Status {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: u16,
        body: String,
    },
    #[snafu(display("Malformed response, url: '{url}', reason: '{reason}'"))]
    MalformedResponse {
        #[snafu(implicit)]
        location: Location,
        url: String,
        reason: String,
    },
    #[snafu(display("Response contained no usable location, url: '{url}'"))]
    MissingLocation {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::RateLimited { url, .. }
            | FetchError::Timeout { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::MalformedResponse { url, .. }
            | FetchError::MissingLocation { url, .. } => url,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum RegistryError {
    #[snafu(display("Could not derive a share id from url '{url}'"))]
    InvalidShareUrl {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("A vessel named '{name}' is already registered"))]
    DuplicateVessel {
        #[snafu(implicit)]
        location: Location,
        name: String,
    },
    #[snafu(display(
        "No unused color left for vessel '{name}', the palette only holds {palette_size} colors"
    ))]
    PaletteExhausted {
        #[snafu(implicit)]
        location: Location,
        name: String,
        palette_size: usize,
    },
}
