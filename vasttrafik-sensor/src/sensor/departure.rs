//! Next-departure sensor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local};
use tracing::debug;

use crate::config::DepartureConfig;
use crate::domain::{AttributeValue, Attributes, DepartureEntry, SensorObservation, StationRef};
use crate::stations::{LookupError, resolve_station};
use crate::throttle::Throttle;
use crate::vasttrafik::JourneyPlanner;

use super::{
    ATTR_ACCESSIBILITY, ATTR_ATTRIBUTION, ATTR_DIRECTION, ATTR_LINE, ATTR_TRACK, ATTRIBUTION,
    SelectError, Sensor, recover_from,
};

/// Shows the next departure from a station.
pub struct DepartureSensor {
    planner: Arc<dyn JourneyPlanner>,
    name: String,
    departure: StationRef,
    heading: Option<StationRef>,
    lines: Vec<String>,
    delay: Duration,
    throttle: Throttle,
    observation: SensorObservation,
}

impl DepartureSensor {
    /// Resolve the configured stations and build the sensor.
    pub async fn new(
        planner: Arc<dyn JourneyPlanner>,
        config: &DepartureConfig,
    ) -> Result<Self, LookupError> {
        let departure = resolve_station(planner.as_ref(), &config.from).await?;
        let heading = match config.heading() {
            Some(heading) => Some(resolve_station(planner.as_ref(), heading).await?),
            None => None,
        };

        Ok(Self {
            planner,
            name: config.display_name().to_string(),
            departure,
            heading,
            lines: config.lines.clone(),
            delay: Duration::minutes(i64::from(config.delay)),
            throttle: Throttle::default(),
            observation: SensorObservation::empty(),
        })
    }

    /// Replace the default throttle.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn departure(&self) -> &StationRef {
        &self.departure
    }

    pub fn heading(&self) -> Option<&StationRef> {
        self.heading.as_ref()
    }

    /// Fetch the board; a failed fetch counts as an empty board.
    async fn fetch_board(&self) -> Vec<DepartureEntry> {
        let at = Local::now().naive_local() + self.delay;
        let direction = self.heading.as_ref().map(StationRef::station_id);

        match self
            .planner
            .departure_board(self.departure.station_id(), direction, at)
            .await
        {
            Ok(board) => board,
            Err(e) => {
                recover_from(self.planner.as_ref(), e, "departure board").await;
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Sensor for DepartureSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn observation(&self) -> &SensorObservation {
        &self.observation
    }

    async fn update(&mut self) -> Result<(), SelectError> {
        if !self.throttle.try_acquire() {
            return Ok(());
        }

        let board = self.fetch_board().await;

        if board.is_empty() {
            debug!(
                "No departures from departure station {} to destination station {}",
                self.departure.display_name(),
                self.heading
                    .as_ref()
                    .map_or("ANY", StationRef::display_name)
            );
        }

        self.observation = select_departure(&board, &self.lines);
        Ok(())
    }
}

/// Pick the next departure worth showing.
///
/// Scans the board in provider order and takes the first entry that is not
/// cancelled and, when `lines` is non-empty, runs one of those lines. No
/// match gives an empty observation.
pub fn select_departure(board: &[DepartureEntry], lines: &[String]) -> SensorObservation {
    board
        .iter()
        .filter(|departure| !departure.cancelled)
        .find(|departure| departure.runs_any_of(lines))
        .map(|departure| {
            SensorObservation::new(departure.departure_time(), departure_attributes(departure))
        })
        .unwrap_or_default()
}

fn departure_attributes(departure: &DepartureEntry) -> Attributes {
    Attributes::compact([
        (
            ATTR_ACCESSIBILITY,
            departure.accessibility.clone().map(AttributeValue::from),
        ),
        (ATTR_ATTRIBUTION, Some(AttributeValue::from(ATTRIBUTION))),
        (
            ATTR_DIRECTION,
            departure.direction.clone().map(AttributeValue::from),
        ),
        (ATTR_LINE, departure.line_name.clone().map(AttributeValue::from)),
        (ATTR_TRACK, departure.track.clone().map(AttributeValue::from)),
    ])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn entry() -> impl Strategy<Value = DepartureEntry> {
        (
            proptest::option::of("[1-9][0-9]?"),
            "[0-2][0-9]:[0-5][0-9]",
            proptest::option::of("[0-2][0-9]:[0-5][0-9]"),
            proptest::option::of("[A-D]?"),
            proptest::option::of("[A-Za-zåäö ]{0,12}"),
            any::<bool>(),
        )
            .prop_map(|(line, time, realtime, track, direction, cancelled)| DepartureEntry {
                line_name: line,
                scheduled_time: time,
                realtime_time: realtime,
                track,
                direction,
                accessibility: None,
                cancelled,
            })
    }

    fn board() -> impl Strategy<Value = Vec<DepartureEntry>> {
        proptest::collection::vec(entry(), 0..12)
    }

    fn filter() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[1-9][0-9]?", 0..3)
    }

    proptest! {
        /// A board of only cancelled departures shows nothing
        #[test]
        fn all_cancelled_shows_nothing(mut board in board(), lines in filter()) {
            for departure in &mut board {
                departure.cancelled = true;
            }
            prop_assert!(select_departure(&board, &lines).is_empty());
        }

        /// The selected line is always one the filter allows
        #[test]
        fn respects_line_filter(board in board(), lines in proptest::collection::vec("[1-9][0-9]?", 1..3)) {
            let obs = select_departure(&board, &lines);
            if let Some(line) = obs.attributes.get(ATTR_LINE).and_then(AttributeValue::as_text) {
                prop_assert!(lines.iter().any(|l| l == line));
            }
        }

        /// Attribute values are never empty
        #[test]
        fn no_empty_attributes(board in board(), lines in filter()) {
            let obs = select_departure(&board, &lines);
            for (_, value) in obs.attributes.iter() {
                prop_assert!(!value.is_empty());
            }
        }

        /// The state is that of the first eligible departure
        #[test]
        fn first_eligible_wins(board in board(), lines in filter()) {
            let expected = board
                .iter()
                .find(|d| !d.cancelled && d.runs_any_of(&lines))
                .map(|d| d.departure_time().to_string());
            prop_assert_eq!(select_departure(&board, &lines).state, expected);
        }
    }
}
