//! Station lookup.
//!
//! Turns configured station names into provider station ids, once, when a
//! sensor is built.

mod error;
mod resolve;

pub use error::LookupError;
pub use resolve::resolve_station;
