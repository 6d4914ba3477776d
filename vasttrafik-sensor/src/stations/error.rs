//! Station lookup error types.

use crate::vasttrafik::PlannerError;

/// Errors that can occur when resolving a station name.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The location search itself failed
    #[error("location search for {query:?} failed: {source}")]
    Planner {
        query: String,
        #[source]
        source: PlannerError,
    },

    /// The location search matched nothing
    #[error("no station matches {query:?}")]
    NotFound { query: String },
}
