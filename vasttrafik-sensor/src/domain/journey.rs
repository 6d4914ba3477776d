//! Journey types.
//!
//! A `Journey` is a provider-computed itinerary: one or more legs, each a
//! continuous ride (or walk) between two stops.

use super::{DomainError, OneOrMany};

/// Where and when a leg starts or ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegEndpoint {
    /// Stop name, e.g. "Brunnsparken, Göteborg".
    pub name: String,
    /// Platform or stop position.
    pub track: Option<String>,
    /// Timetabled date, `YYYY-MM-DD`.
    pub date: String,
    /// Timetabled time, `HH:MM`.
    pub time: String,
    /// Live date estimate.
    pub realtime_date: Option<String>,
    /// Live time estimate.
    pub realtime_time: Option<String>,
}

impl LegEndpoint {
    pub fn new(name: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            track: None,
            date: date.into(),
            time: time.into(),
            realtime_date: None,
            realtime_time: None,
        }
    }

    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn with_realtime(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.realtime_date = Some(date.into());
        self.realtime_time = Some(time.into());
        self
    }

    /// Realtime time if known, otherwise the timetabled one.
    pub fn best_time(&self) -> &str {
        self.realtime_time.as_deref().unwrap_or(&self.time)
    }

    /// `"<date> <time>"`, both taken from the realtime estimate when there
    /// is one.
    pub fn best_date_time(&self) -> String {
        match &self.realtime_time {
            Some(time) => {
                let date = self.realtime_date.as_deref().unwrap_or(&self.date);
                format!("{date} {time}")
            }
            None => format!("{} {}", self.date, self.time),
        }
    }
}

/// One vehicle (or walking) segment of a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyLeg {
    /// Short line name, or the long name when the provider has none.
    pub name: String,
    pub origin: LegEndpoint,
    pub destination: LegEndpoint,
}

impl JourneyLeg {
    pub fn new(name: impl Into<String>, origin: LegEndpoint, destination: LegEndpoint) -> Self {
        Self {
            name: name.into(),
            origin,
            destination,
        }
    }

    /// Human-readable summary: `"6 → Brunnsparken (A) (10:14)"`.
    ///
    /// The track is omitted when unknown; the arrival time is realtime when
    /// available.
    pub fn describe(&self) -> String {
        let destination = &self.destination;
        match &destination.track {
            Some(track) => format!(
                "{} → {} ({}) ({})",
                self.name,
                destination.name,
                track,
                destination.best_time()
            ),
            None => format!(
                "{} → {} ({})",
                self.name,
                destination.name,
                destination.best_time()
            ),
        }
    }
}

/// A complete itinerary.
///
/// The legs keep the shape the provider delivered them in (a bare leg or a
/// list); consumers normalize with [`OneOrMany::as_slice`].
///
/// # Invariants
///
/// - At least one leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    legs: OneOrMany<JourneyLeg>,
}

impl Journey {
    /// Constructs a journey.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyJourney` for an empty leg list.
    pub fn new(legs: OneOrMany<JourneyLeg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }
        Ok(Self { legs })
    }

    /// A journey of exactly one leg, as delivered unwrapped by the provider.
    pub fn single(leg: JourneyLeg) -> Self {
        Self {
            legs: OneOrMany::One(leg),
        }
    }

    pub fn legs(&self) -> &OneOrMany<JourneyLeg> {
        &self.legs
    }

    pub fn first_leg(&self) -> &JourneyLeg {
        // Non-empty by construction
        &self.legs.as_slice()[0]
    }
}
