//! Västtrafik Reseplaneraren v2 response DTOs.
//!
//! These types map directly to the JSON responses. The API has a few habits
//! worth knowing about:
//! - single-element arrays are sent as a bare object (see [`OneOrMany`])
//! - empty results omit the list entirely instead of sending `[]`
//! - flags such as `cancelled` are the string `"true"` and absent otherwise
//! - failures inside a 200 response come back as `error` / `errorText`

use serde::{Deserialize, Deserializer};

use crate::domain::OneOrMany;

/// Response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: Option<u64>,
}

/// Error fields embedded in every top-level list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderFault {
    pub error: Option<String>,
    #[serde(rename = "errorText")]
    pub error_text: Option<String>,
}

/// Response from `location.name`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationNameResponse {
    #[serde(rename = "LocationList")]
    pub location_list: LocationList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationList {
    /// Matching stops, best match first.
    #[serde(rename = "StopLocation", default)]
    pub stop_location: OneOrMany<StopLocation>,

    #[serde(flatten)]
    pub fault: ProviderFault,
}

/// A stop matched by name.
#[derive(Debug, Clone, Deserialize)]
pub struct StopLocation {
    /// Stop id (16 digits).
    pub id: String,
    /// Stop name including municipality, e.g. "Brunnsparken, Göteborg".
    pub name: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Response from `departureBoard`.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureBoardResponse {
    #[serde(rename = "DepartureBoard")]
    pub departure_board: DepartureBoard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartureBoard {
    pub servertime: Option<String>,
    pub serverdate: Option<String>,

    /// Upcoming departures in time order.
    #[serde(rename = "Departure", default)]
    pub departure: OneOrMany<Departure>,

    #[serde(flatten)]
    pub fault: ProviderFault,
}

/// One departure on the board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Long line name, e.g. "Spårvagn 6".
    pub name: Option<String>,

    /// Short line name, e.g. "6".
    pub sname: Option<String>,

    /// Vehicle type (TRAM, BUS, VAS, ...).
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,

    /// Stop name.
    pub stop: Option<String>,

    /// Scheduled departure time, "HH:MM".
    pub time: Option<String>,

    /// Scheduled departure date, "YYYY-MM-DD".
    pub date: Option<String>,

    /// Realtime departure time.
    pub rt_time: Option<String>,

    /// Realtime departure date.
    pub rt_date: Option<String>,

    /// Headsign.
    pub direction: Option<String>,

    /// Platform or stop position.
    pub track: Option<String>,

    pub accessibility: Option<String>,

    #[serde(default, deserialize_with = "flag")]
    pub cancelled: bool,
}

/// Response from `trip`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripResponse {
    #[serde(rename = "TripList")]
    pub trip_list: TripList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripList {
    /// Suggested journeys, earliest first.
    #[serde(rename = "Trip", default)]
    pub trip: OneOrMany<Trip>,

    #[serde(flatten)]
    pub fault: ProviderFault,
}

/// One suggested journey.
#[derive(Debug, Clone, Deserialize)]
pub struct Trip {
    #[serde(rename = "Leg")]
    pub leg: OneOrMany<Leg>,
}

/// One segment of a journey.
#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    /// Long name, e.g. "Spårvagn 6" or "Gå" for walks.
    pub name: Option<String>,

    /// Short line name; absent for walks.
    pub sname: Option<String>,

    #[serde(rename = "type")]
    pub leg_type: Option<String>,

    pub direction: Option<String>,

    #[serde(rename = "Origin")]
    pub origin: LegStop,

    #[serde(rename = "Destination")]
    pub destination: LegStop,
}

/// Start or end of a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegStop {
    pub name: String,
    pub id: Option<String>,
    pub track: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub rt_date: Option<String>,
    pub rt_time: Option<String>,
}

/// Accept `true`, `"true"` and `"false"` for boolean flags.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => !s.eq_ignore_ascii_case("false"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_departure_board() {
        let json = r#"{
            "DepartureBoard": {
                "noNamespaceSchemaLocation": "http://api.vasttrafik.se/v1/hafasRestDepartureBoard.xsd",
                "servertime": "10:30",
                "serverdate": "2024-03-15",
                "Departure": [
                    {
                        "name": "Spårvagn 6",
                        "sname": "6",
                        "type": "TRAM",
                        "stop": "Brunnsparken, Göteborg",
                        "time": "10:32",
                        "date": "2024-03-15",
                        "rtTime": "10:34",
                        "rtDate": "2024-03-15",
                        "direction": "Kortedala",
                        "track": "A",
                        "accessibility": "wheelChair"
                    },
                    {
                        "name": "Buss 16",
                        "sname": "16",
                        "type": "BUS",
                        "time": "10:35",
                        "date": "2024-03-15",
                        "direction": "Högsbohöjd",
                        "track": "B",
                        "cancelled": "true"
                    }
                ]
            }
        }"#;

        let board: DepartureBoardResponse = serde_json::from_str(json).unwrap();
        let board = board.departure_board;

        assert_eq!(board.servertime.as_deref(), Some("10:30"));
        assert!(board.fault.error.is_none());

        let departures = board.departure.into_vec();
        assert_eq!(departures.len(), 2);

        let first = &departures[0];
        assert_eq!(first.sname.as_deref(), Some("6"));
        assert_eq!(first.rt_time.as_deref(), Some("10:34"));
        assert_eq!(first.track.as_deref(), Some("A"));
        assert!(!first.cancelled);

        assert!(departures[1].cancelled);
        assert!(departures[1].rt_time.is_none());
    }

    #[test]
    fn deserialize_single_departure_and_missing_list() {
        let json = r#"{"DepartureBoard": {"Departure": {"sname": "6", "time": "10:32"}}}"#;
        let board: DepartureBoardResponse = serde_json::from_str(json).unwrap();
        assert_eq!(board.departure_board.departure.len(), 1);

        let json = r#"{"DepartureBoard": {"servertime": "03:12"}}"#;
        let board: DepartureBoardResponse = serde_json::from_str(json).unwrap();
        assert!(board.departure_board.departure.is_empty());
    }

    #[test]
    fn deserialize_provider_error() {
        let json = r#"{
            "DepartureBoard": {
                "error": "R0007",
                "errorText": "Internal communication error"
            }
        }"#;
        let board: DepartureBoardResponse = serde_json::from_str(json).unwrap();
        let fault = board.departure_board.fault;
        assert_eq!(fault.error.as_deref(), Some("R0007"));
        assert_eq!(fault.error_text.as_deref(), Some("Internal communication error"));
    }

    #[test]
    fn deserialize_location_list() {
        let json = r#"{
            "LocationList": {
                "StopLocation": [
                    {"name": "Brunnsparken, Göteborg", "lon": "11.967", "lat": "57.706", "id": "9021014001760000", "idx": "1"},
                    {"name": "Brunnsgatan, Göteborg", "lon": "11.951", "lat": "57.699", "id": "9021014001750000", "idx": "2"}
                ],
                "CoordLocation": [
                    {"name": "Brunnsparken", "lon": "11.967", "lat": "57.706", "type": "ADR", "idx": "3"}
                ]
            }
        }"#;

        let response: LocationNameResponse = serde_json::from_str(json).unwrap();
        let stops = response.location_list.stop_location.into_vec();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].id, "9021014001760000");
        assert_eq!(stops[0].name, "Brunnsparken, Göteborg");
    }

    #[test]
    fn deserialize_trip_with_single_leg() {
        let json = r#"{
            "TripList": {
                "Trip": [
                    {
                        "Leg": {
                            "name": "Spårvagn 6",
                            "sname": "6",
                            "type": "TRAM",
                            "direction": "Kortedala",
                            "Origin": {"name": "Brunnsparken, Göteborg", "id": "9022014001760001", "track": "A", "date": "2024-03-15", "time": "10:32", "rtDate": "2024-03-15", "rtTime": "10:34"},
                            "Destination": {"name": "Centralstationen, Göteborg", "id": "9022014001950001", "track": "C", "date": "2024-03-15", "time": "10:35"}
                        }
                    },
                    {
                        "Leg": [
                            {
                                "name": "Gå",
                                "type": "WALK",
                                "Origin": {"name": "Brunnsparken, Göteborg", "date": "2024-03-15", "time": "10:40"},
                                "Destination": {"name": "Nordstan, Göteborg", "date": "2024-03-15", "time": "10:44"}
                            },
                            {
                                "name": "Buss 16",
                                "sname": "16",
                                "type": "BUS",
                                "Origin": {"name": "Nordstan, Göteborg", "date": "2024-03-15", "time": "10:46"},
                                "Destination": {"name": "Centralstationen, Göteborg", "track": "D", "date": "2024-03-15", "time": "10:49"}
                            }
                        ]
                    }
                ]
            }
        }"#;

        let response: TripResponse = serde_json::from_str(json).unwrap();
        let trips = response.trip_list.trip.into_vec();
        assert_eq!(trips.len(), 2);

        assert!(matches!(trips[0].leg, OneOrMany::One(_)));
        let leg = &trips[0].leg.as_slice()[0];
        assert_eq!(leg.sname.as_deref(), Some("6"));
        assert_eq!(leg.origin.rt_time.as_deref(), Some("10:34"));
        assert_eq!(leg.destination.track.as_deref(), Some("C"));

        let legs = trips[1].leg.as_slice();
        assert_eq!(legs.len(), 2);
        assert!(legs[0].sname.is_none());
        assert_eq!(legs[0].name.as_deref(), Some("Gå"));
    }

    #[test]
    fn deserialize_token() {
        let json = r#"{"scope": "device_1", "token_type": "Bearer", "expires_in": 86400, "access_token": "abc"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, Some(86400));
    }

    #[test]
    fn flag_variants() {
        #[derive(Deserialize)]
        struct Flagged {
            #[serde(default, deserialize_with = "flag")]
            cancelled: bool,
        }

        let parse = |json: &str| serde_json::from_str::<Flagged>(json).unwrap().cancelled;
        assert!(parse(r#"{"cancelled": "true"}"#));
        assert!(parse(r#"{"cancelled": true}"#));
        assert!(!parse(r#"{"cancelled": "false"}"#));
        assert!(!parse(r#"{}"#));
    }
}
