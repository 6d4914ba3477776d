//! Domain types for the Västtrafik sensors.
//!
//! These are the provider-independent values the selectors work on: station
//! references, departure board rows, journeys and the resulting sensor
//! observations.

mod departure;
mod error;
mod journey;
mod observation;
mod one_or_many;
mod station;

pub use departure::DepartureEntry;
pub use error::DomainError;
pub use journey::{Journey, JourneyLeg, LegEndpoint};
pub use observation::{AttributeValue, Attributes, SensorObservation};
pub use one_or_many::{OneOrMany, one_or_many};
pub use station::{Location, StationRef};
