use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid provider base url '{url}'"))]
    InvalidBaseUrl {
        #[snafu(implicit)]
        location: Location,
        url: String,
    },
    #[snafu(display("Invalid value for header '{header}'"))]
    InvalidHeader {
        #[snafu(implicit)]
        location: Location,
        header: &'static str,
        #[snafu(source)]
        error: http::header::InvalidHeaderValue,
    },
}
