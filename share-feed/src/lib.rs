#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Client for the public share feed of a location-sharing provider.

mod client;
mod error;
mod models;

pub use client::*;
pub use error::{Error, Result};
pub use models::*;
