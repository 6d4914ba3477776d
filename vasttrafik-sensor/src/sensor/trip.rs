//! Journey planner sensor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local};
use tracing::debug;

use crate::config::TripConfig;
use crate::domain::{AttributeValue, Attributes, Journey, JourneyLeg, SensorObservation, StationRef};
use crate::stations::{LookupError, resolve_station};
use crate::throttle::Throttle;
use crate::vasttrafik::JourneyPlanner;

use super::{
    ATTR_ATTRIBUTION, ATTR_DATE_TIME_DEPARTURE, ATTR_TRIP, ATTRIBUTION, SelectError, Sensor,
    recover_from,
};

/// Shows the departure time and legs of an upcoming journey between two
/// stations.
pub struct TripSensor {
    planner: Arc<dyn JourneyPlanner>,
    name: String,
    origin: StationRef,
    destination: StationRef,
    delay: Duration,
    /// Which of the proposed journeys to show, 0 being the earliest.
    skip: usize,
    throttle: Throttle,
    observation: SensorObservation,
}

impl TripSensor {
    pub async fn new(
        planner: Arc<dyn JourneyPlanner>,
        config: &TripConfig,
    ) -> Result<Self, LookupError> {
        let origin = resolve_station(planner.as_ref(), &config.from).await?;
        let destination = resolve_station(planner.as_ref(), &config.destination).await?;

        Ok(Self {
            planner,
            name: config.display_name().to_string(),
            origin,
            destination,
            delay: Duration::minutes(i64::from(config.delay)),
            skip: config.skip,
            throttle: Throttle::default(),
            observation: SensorObservation::empty(),
        })
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn origin(&self) -> &StationRef {
        &self.origin
    }

    pub fn destination(&self) -> &StationRef {
        &self.destination
    }

    async fn fetch_journeys(&self) -> Vec<Journey> {
        let at = Local::now().naive_local() + self.delay;

        match self
            .planner
            .trip(self.origin.station_id(), self.destination.station_id(), at)
            .await
        {
            Ok(journeys) => journeys,
            Err(e) => {
                recover_from(self.planner.as_ref(), e, "trips").await;
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Sensor for TripSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn observation(&self) -> &SensorObservation {
        &self.observation
    }

    /// A `skip` beyond the journeys on offer fails the cycle and leaves the
    /// previous observation in place.
    async fn update(&mut self) -> Result<(), SelectError> {
        if !self.throttle.try_acquire() {
            return Ok(());
        }

        let journeys = self.fetch_journeys().await;

        if journeys.is_empty() {
            debug!(
                "No journeys from {} to {} found",
                self.origin.display_name(),
                self.destination.display_name()
            );
        }

        self.observation = select_journey(&journeys, self.skip)?;
        Ok(())
    }
}

/// Summarize the `skip`-th journey.
///
/// The state is the first leg's departure time; the `trip` attribute lists
/// every leg in travel order.
///
/// # Errors
///
/// `SelectError::SkipOutOfRange` when `journeys` is non-empty but has no
/// entry at `skip`. An empty list is not an error.
pub fn select_journey(journeys: &[Journey], skip: usize) -> Result<SensorObservation, SelectError> {
    if journeys.is_empty() {
        return Ok(SensorObservation::empty());
    }

    let journey = journeys.get(skip).ok_or(SelectError::SkipOutOfRange {
        skip,
        available: journeys.len(),
    })?;

    let legs = journey.legs().as_slice();
    let first = journey.first_leg();
    let trip: Vec<String> = legs.iter().map(JourneyLeg::describe).collect();

    let attributes = Attributes::compact([
        (ATTR_ATTRIBUTION, Some(AttributeValue::from(ATTRIBUTION))),
        (ATTR_TRIP, Some(AttributeValue::from(trip))),
        (
            ATTR_DATE_TIME_DEPARTURE,
            Some(AttributeValue::from(first.origin.best_date_time())),
        ),
    ]);

    Ok(SensorObservation::new(first.origin.best_time(), attributes))
}
