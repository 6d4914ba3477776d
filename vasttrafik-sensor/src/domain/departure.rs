//! Departure board entries.

/// One row of a departure board.
///
/// Times are kept as the provider's `HH:MM` strings since they are only ever
/// displayed, never compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureEntry {
    /// Short line name, e.g. "6" or "Röd". Absent when the provider sends
    /// only the long name.
    pub line_name: Option<String>,
    /// Timetabled departure.
    pub scheduled_time: String,
    /// Live estimate, when the vehicle reports one.
    pub realtime_time: Option<String>,
    /// Platform or stop position letter.
    pub track: Option<String>,
    /// Headsign shown on the vehicle.
    pub direction: Option<String>,
    /// Accessibility marker, e.g. "wheelChair".
    pub accessibility: Option<String>,
    pub cancelled: bool,
}

impl DepartureEntry {
    /// A scheduled, non-cancelled departure with no optional details.
    pub fn new(line_name: impl Into<String>, scheduled_time: impl Into<String>) -> Self {
        Self {
            line_name: Some(line_name.into()),
            scheduled_time: scheduled_time.into(),
            realtime_time: None,
            track: None,
            direction: None,
            accessibility: None,
            cancelled: false,
        }
    }

    pub fn with_realtime(mut self, time: impl Into<String>) -> Self {
        self.realtime_time = Some(time.into());
        self
    }

    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_accessibility(mut self, accessibility: impl Into<String>) -> Self {
        self.accessibility = Some(accessibility.into());
        self
    }

    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// True if this departure runs one of `lines`. An empty list matches
    /// everything, including departures without a short line name.
    pub fn runs_any_of(&self, lines: &[String]) -> bool {
        lines.is_empty()
            || self
                .line_name
                .as_ref()
                .is_some_and(|line| lines.contains(line))
    }

    /// Realtime time if known, otherwise the timetabled one.
    pub fn departure_time(&self) -> &str {
        self.realtime_time
            .as_deref()
            .unwrap_or(&self.scheduled_time)
    }
}
