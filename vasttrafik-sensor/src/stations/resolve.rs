//! Station name resolution.

use tracing::debug;

use crate::domain::StationRef;
use crate::vasttrafik::JourneyPlanner;

use super::error::LookupError;

/// Resolve a configured station to a [`StationRef`].
///
/// An all-digit string is already a station id and is returned as is
/// without touching the network. Anything else is looked up by name and the
/// provider's best match wins; the display name stays what the user wrote.
pub async fn resolve_station<P>(planner: &P, name_or_id: &str) -> Result<StationRef, LookupError>
where
    P: JourneyPlanner + ?Sized,
{
    if let Some(station) = StationRef::numeric(name_or_id) {
        return Ok(station);
    }

    let matches = planner
        .location_by_name(name_or_id)
        .await
        .map_err(|source| LookupError::Planner {
            query: name_or_id.to_string(),
            source,
        })?;

    let best = matches
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound {
            query: name_or_id.to_string(),
        })?;

    debug!(query = name_or_id, id = %best.id, name = %best.name, "resolved station");
    Ok(StationRef::new(name_or_id, best.id))
}
