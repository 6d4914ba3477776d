//! Sensors exposed to the host.
//!
//! A sensor has a name, an icon, a display state and a set of attributes.
//! The host calls [`Sensor::update`] on its own schedule; each sensor
//! throttles its own API calls and replaces its observation wholesale on
//! every real fetch.

mod departure;
mod error;
mod trip;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{Attributes, SensorObservation};
use crate::stations::LookupError;
use crate::vasttrafik::{JourneyPlanner, PlannerError};

pub use departure::{DepartureSensor, select_departure};
pub use error::SelectError;
pub use trip::{TripSensor, select_journey};

/// Icon shown for every sensor.
pub const ICON: &str = "mdi:train";

/// Data attribution included in every non-empty observation.
pub const ATTRIBUTION: &str = "Data provided by Västtrafik";

pub const ATTR_ACCESSIBILITY: &str = "accessibility";
pub const ATTR_ATTRIBUTION: &str = "attribution";
pub const ATTR_DIRECTION: &str = "direction";
pub const ATTR_LINE: &str = "line";
pub const ATTR_TRACK: &str = "track";
pub const ATTR_TRIP: &str = "trip";
pub const ATTR_DATE_TIME_DEPARTURE: &str = "date_time_departure";

/// A polled entity.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    fn icon(&self) -> &str {
        ICON
    }

    /// The latest observation. Empty until the first successful update.
    fn observation(&self) -> &SensorObservation;

    /// Current display state, e.g. "10:32".
    fn state(&self) -> Option<&str> {
        self.observation().state.as_deref()
    }

    fn attributes(&self) -> &Attributes {
        &self.observation().attributes
    }

    /// Refresh from the API, at most once per throttle interval.
    ///
    /// Provider errors are handled internally; only selection failures are
    /// returned.
    async fn update(&mut self) -> Result<(), SelectError>;
}

/// Build every sensor the configuration asks for.
///
/// Station names are resolved here; any failure aborts the whole setup.
pub async fn build_sensors(
    planner: Arc<dyn JourneyPlanner>,
    config: &Config,
) -> Result<Vec<Box<dyn Sensor>>, LookupError> {
    let mut sensors: Vec<Box<dyn Sensor>> =
        Vec::with_capacity(config.departures.len() + config.planner.len());

    for departure in &config.departures {
        let sensor = DepartureSensor::new(Arc::clone(&planner), departure).await?;
        sensors.push(Box::new(sensor));
    }

    for trip in &config.planner {
        let sensor = TripSensor::new(Arc::clone(&planner), trip).await?;
        sensors.push(Box::new(sensor));
    }

    Ok(sensors)
}

/// Shared error path for board and trip queries: refresh the token and let
/// the next throttle window retry.
async fn recover_from(planner: &dyn JourneyPlanner, error: PlannerError, what: &str) {
    debug!(error = %error, "Unable to read {what}, updating token");
    if let Err(e) = planner.refresh_token().await {
        warn!(error = %e, "token refresh failed");
    }
}
