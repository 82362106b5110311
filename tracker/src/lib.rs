#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Implements a binary that periodically polls the share feed of every configured vessel and
//! reports the vessel closest to the configured reference point.

pub mod error;
pub mod settings;
pub mod startup;
