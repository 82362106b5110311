#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain model for tracking a small fleet of vessels through a location-sharing feed: position
//! fixes, bounded track history, the fetch policy guarding the upstream provider and the
//! proximity evaluation against a fixed reference point.

mod error;
mod fetcher;
mod fix;
mod fleet;
mod geodesy;
mod history;
mod palette;
mod proximity;
mod snapshot;
mod vessel;

#[cfg(any(test, feature = "test"))]
mod test_helper;

pub use error::*;
pub use fetcher::*;
pub use fix::*;
pub use fleet::*;
pub use geodesy::*;
pub use history::*;
pub use palette::*;
pub use proximity::*;
pub use snapshot::*;
pub use vessel::*;

#[cfg(any(test, feature = "test"))]
pub use test_helper::*;
