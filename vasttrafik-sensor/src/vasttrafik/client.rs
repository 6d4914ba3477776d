//! Västtrafik Reseplaneraren HTTP client.
//!
//! Provides async methods for location search, departure boards and trip
//! planning. Handles OAuth client-credential tokens and conversion to domain
//! types.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{DepartureEntry, Journey, Location};

use super::convert::{convert_departure_board, convert_locations, convert_trips};
use super::error::PlannerError;
use super::types::{
    DepartureBoardResponse, LocationNameResponse, ProviderFault, TokenResponse, TripResponse,
};

/// Default base URL for the Reseplaneraren v2 API.
const DEFAULT_BASE_URL: &str = "https://api.vasttrafik.se/bin/rest.exe/v2";

/// Default OAuth token endpoint.
const DEFAULT_TOKEN_URL: &str = "https://api.vasttrafik.se/token";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// In-band fault codes that mean "nothing found" rather than a failure:
/// H890 no connections found, H891 no route found.
const NO_RESULT_CODES: &[&str] = &["H890", "H891"];

/// Operations the sensors need from a journey planner.
///
/// Every call may fail with a [`PlannerError`]; callers recover by calling
/// [`JourneyPlanner::refresh_token`] and trying again on their next cycle.
#[async_trait]
pub trait JourneyPlanner: Send + Sync {
    /// Search stops by name, best match first.
    async fn location_by_name(&self, query: &str) -> Result<Vec<Location>, PlannerError>;

    /// Upcoming departures from a station, optionally only those heading
    /// towards `direction` (a station id).
    async fn departure_board(
        &self,
        station_id: &str,
        direction: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<Vec<DepartureEntry>, PlannerError>;

    /// Suggested journeys between two stations, earliest first.
    async fn trip(
        &self,
        origin_id: &str,
        destination_id: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<Journey>, PlannerError>;

    /// Replace the access token. Safe to call concurrently.
    async fn refresh_token(&self) -> Result<(), PlannerError>;
}

/// Configuration for the Västtrafik client.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// OAuth client key
    pub key: String,
    /// OAuth client secret
    pub secret: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Token endpoint
    pub token_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlannerConfig {
    /// Create a new config with the given credentials.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom token URL (for testing).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Value of the `Authorization` header for the token endpoint.
    fn basic_credentials(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.key, self.secret));
        format!("Basic {encoded}")
    }
}

/// Västtrafik API client.
///
/// Owns its access token. Reads share the token; a refresh takes the write
/// lock for the whole token request so concurrent refreshes queue up
/// instead of racing.
#[derive(Debug)]
pub struct VasttrafikClient {
    http: reqwest::Client,
    config: PlannerConfig,
    token: RwLock<String>,
}

impl VasttrafikClient {
    /// Create a client and fetch its first access token.
    pub async fn connect(config: PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let token = request_token(&http, &config).await?;
        debug!("obtained access token");

        Ok(Self {
            http,
            config,
            token: RwLock::new(token),
        })
    }

    /// GET an API endpoint with the current bearer token.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, PlannerError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let token = self.token.read().await.clone();

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PlannerError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PlannerError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PlannerError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[async_trait]
impl JourneyPlanner for VasttrafikClient {
    #[instrument(skip(self))]
    async fn location_by_name(&self, query: &str) -> Result<Vec<Location>, PlannerError> {
        let response: LocationNameResponse = self
            .get("location.name", &[("input", query.to_string())])
            .await?;

        let list = response.location_list;
        check_fault(list.fault)?;

        let locations = convert_locations(list.stop_location.into_vec());
        debug!(count = locations.len(), "locations found");
        Ok(locations)
    }

    #[instrument(skip(self))]
    async fn departure_board(
        &self,
        station_id: &str,
        direction: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<Vec<DepartureEntry>, PlannerError> {
        let mut params = vec![
            ("id", station_id.to_string()),
            ("date", at.format("%Y-%m-%d").to_string()),
            ("time", at.format("%H:%M").to_string()),
        ];
        if let Some(direction) = direction {
            params.push(("direction", direction.to_string()));
        }

        let response: DepartureBoardResponse = self.get("departureBoard", &params).await?;

        let board = response.departure_board;
        check_fault(board.fault)?;

        let departures = convert_departure_board(board.departure.into_vec());
        debug!(count = departures.len(), "departures found");
        Ok(departures)
    }

    #[instrument(skip(self))]
    async fn trip(
        &self,
        origin_id: &str,
        destination_id: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<Journey>, PlannerError> {
        let params = [
            ("originId", origin_id.to_string()),
            ("destId", destination_id.to_string()),
            ("date", at.format("%Y-%m-%d").to_string()),
            ("time", at.format("%H:%M").to_string()),
        ];

        let response: TripResponse = self.get("trip", &params).await?;

        let list = response.trip_list;
        check_fault(list.fault)?;

        let journeys = convert_trips(list.trip.into_vec()).map_err(PlannerError::Invalid)?;
        debug!(count = journeys.len(), "journeys found");
        Ok(journeys)
    }

    async fn refresh_token(&self) -> Result<(), PlannerError> {
        let mut token = self.token.write().await;
        *token = request_token(&self.http, &self.config).await?;
        debug!("refreshed access token");
        Ok(())
    }
}

/// Request a token with the client-credentials grant.
async fn request_token(
    http: &reqwest::Client,
    config: &PlannerConfig,
) -> Result<String, PlannerError> {
    let scope = format!("device_{}", std::process::id());

    let response = http
        .post(&config.token_url)
        .header(AUTHORIZATION, config.basic_credentials())
        .form(&[
            ("grant_type", "client_credentials"),
            ("scope", scope.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST {
        return Err(PlannerError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PlannerError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    let token: TokenResponse = serde_json::from_str(&body).map_err(|e| PlannerError::Json {
        message: e.to_string(),
        body: None,
    })?;

    Ok(token.access_token)
}

/// Turn an in-band `error` field into a `PlannerError`. No-result codes
/// pass, leaving the (absent) list to decode as empty.
fn check_fault(fault: ProviderFault) -> Result<(), PlannerError> {
    match fault.error {
        Some(code) if NO_RESULT_CODES.contains(&code.as_str()) => {
            debug!(code = %code, "no results");
            Ok(())
        }
        Some(code) => Err(PlannerError::Provider {
            code,
            message: fault.error_text.unwrap_or_default(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = PlannerConfig::new("key", "secret")
            .with_base_url("http://localhost:8080")
            .with_token_url("http://localhost:8080/token")
            .with_timeout(60);

        assert_eq!(config.key, "key");
        assert_eq!(config.secret, "secret");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.token_url, "http://localhost:8080/token");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = PlannerConfig::new("key", "secret");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn basic_credentials() {
        let config = PlannerConfig::new("key", "secret");
        assert_eq!(config.basic_credentials(), "Basic a2V5OnNlY3JldA==");
    }

    #[test]
    fn fault_becomes_error() {
        assert!(check_fault(ProviderFault::default()).is_ok());

        let fault = ProviderFault {
            error: Some("H895".into()),
            error_text: Some("Departure/Arrival are too near".into()),
        };
        match check_fault(fault) {
            Err(PlannerError::Provider { code, message }) => {
                assert_eq!(code, "H895");
                assert_eq!(message, "Departure/Arrival are too near");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn no_results_is_not_a_fault() {
        let fault = ProviderFault {
            error: Some("H890".into()),
            error_text: Some("No connections found".into()),
        };
        assert!(check_fault(fault).is_ok());
    }
}
