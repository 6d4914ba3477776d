//! Conversion from Västtrafik DTOs to domain types.

use tracing::warn;

use crate::domain::{DepartureEntry, DomainError, Journey, JourneyLeg, LegEndpoint, Location};

use super::types::{Departure, Leg, LegStop, StopLocation, Trip};

/// Convert location search matches, keeping the provider's ranking.
pub fn convert_locations(stops: Vec<StopLocation>) -> Vec<Location> {
    stops
        .into_iter()
        .map(|stop| Location::new(stop.id, stop.name))
        .collect()
}

/// Convert a departure board.
///
/// Rows that cannot be converted are logged and skipped rather than failing
/// the whole board.
pub fn convert_departure_board(departures: Vec<Departure>) -> Vec<DepartureEntry> {
    departures
        .into_iter()
        .filter_map(|departure| match convert_departure(departure) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping departure");
                None
            }
        })
        .collect()
}

/// Convert a single departure row.
pub fn convert_departure(departure: Departure) -> Result<DepartureEntry, DomainError> {
    let scheduled_time = departure.time.ok_or(DomainError::MissingField("time"))?;

    Ok(DepartureEntry {
        line_name: departure.sname,
        scheduled_time,
        realtime_time: departure.rt_time,
        track: departure.track,
        direction: departure.direction,
        accessibility: departure.accessibility,
        cancelled: departure.cancelled,
    })
}

/// Convert trip suggestions.
///
/// Sensors pick a trip by its position in the provider's list, so one
/// malformed trip fails the whole list instead of shifting the rest.
pub fn convert_trips(trips: Vec<Trip>) -> Result<Vec<Journey>, DomainError> {
    trips.into_iter().map(convert_trip).collect()
}

/// Convert one trip, keeping the legs in the shape they arrived in.
pub fn convert_trip(trip: Trip) -> Result<Journey, DomainError> {
    let legs = trip.leg.try_map(convert_leg)?;
    Journey::new(legs)
}

/// Convert one leg. The short line name wins over the long one.
pub fn convert_leg(leg: Leg) -> Result<JourneyLeg, DomainError> {
    let name = leg
        .sname
        .or(leg.name)
        .ok_or(DomainError::MissingField("leg name"))?;

    Ok(JourneyLeg::new(
        name,
        convert_leg_stop(leg.origin)?,
        convert_leg_stop(leg.destination)?,
    ))
}

fn convert_leg_stop(stop: LegStop) -> Result<LegEndpoint, DomainError> {
    Ok(LegEndpoint {
        name: stop.name,
        track: stop.track,
        date: stop.date.ok_or(DomainError::MissingField("date"))?,
        time: stop.time.ok_or(DomainError::MissingField("time"))?,
        realtime_date: stop.rt_date,
        realtime_time: stop.rt_time,
    })
}
