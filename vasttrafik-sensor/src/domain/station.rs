//! Station references.

use std::fmt;

/// A match returned by the provider's location search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Provider station id, e.g. `9021014001760000`.
    pub id: String,
    /// Provider display name, e.g. `Brunnsparken, Göteborg`.
    pub name: String,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A resolved station: the name as configured plus the provider id.
///
/// Built once when a sensor is constructed and never changed afterwards.
///
/// # Examples
///
/// ```
/// use vasttrafik_sensor::domain::StationRef;
///
/// let station = StationRef::numeric("9021014001000000").unwrap();
/// assert_eq!(station.display_name(), station.station_id());
///
/// assert!(StationRef::numeric("Brunnsparken").is_none());
/// assert!(StationRef::numeric("").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRef {
    display_name: String,
    station_id: String,
}

impl StationRef {
    pub fn new(display_name: impl Into<String>, station_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            station_id: station_id.into(),
        }
    }

    /// Treat an all-digit string as a ready-made station id.
    ///
    /// Returns `None` for anything that needs a name lookup, including the
    /// empty string.
    pub fn numeric(query: &str) -> Option<Self> {
        if is_decimal(query) {
            Some(Self::new(query, query))
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }
}

impl fmt::Display for StationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.station_id)
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_passes_through() {
        let station = StationRef::numeric("9021014001000000").unwrap();
        assert_eq!(station.display_name(), "9021014001000000");
        assert_eq!(station.station_id(), "9021014001000000");
    }

    #[test]
    fn non_numeric_is_rejected() {
        assert!(StationRef::numeric("Centralstationen").is_none());
        assert!(StationRef::numeric("90210 1400").is_none());
        assert!(StationRef::numeric("-1").is_none());
        assert!(StationRef::numeric("").is_none());
    }

    #[test]
    fn display() {
        let station = StationRef::new("Brunnsparken", "9021014001760000");
        assert_eq!(station.to_string(), "Brunnsparken (9021014001760000)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any run of digits is its own id
        #[test]
        fn digits_always_pass_through(s in "[0-9]{1,20}") {
            let station = StationRef::numeric(&s).unwrap();
            prop_assert_eq!(station.display_name(), s.as_str());
            prop_assert_eq!(station.station_id(), s.as_str());
        }

        /// Anything containing a non-digit needs a lookup
        #[test]
        fn names_need_lookup(s in "[0-9]{0,5}[A-Za-zåäö ,][0-9A-Za-z ]{0,10}") {
            prop_assert!(StationRef::numeric(&s).is_none());
        }
    }
}
