//! In-memory journey planner for testing without API access.
//!
//! Serves canned locations, departure boards and journeys, counts every call
//! and can be switched into a failing mode to exercise error recovery.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::domain::{DepartureEntry, Journey, Location};

use super::client::JourneyPlanner;
use super::error::PlannerError;

/// Mock journey planner with scripted responses.
#[derive(Debug, Default)]
pub struct MockPlanner {
    /// Location matches, keyed by exact query.
    locations: HashMap<String, Vec<Location>>,
    board: RwLock<Vec<DepartureEntry>>,
    journeys: RwLock<Vec<Journey>>,
    failing: AtomicBool,
    /// Last `(station_id, direction)` passed to `departure_board`.
    last_board_query: RwLock<Option<(String, Option<String>)>>,
    /// Last `(origin_id, destination_id)` passed to `trip`.
    last_trip_query: RwLock<Option<(String, String)>>,
    /// Query time of the last board or trip call.
    last_query_at: RwLock<Option<NaiveDateTime>>,
    location_calls: AtomicUsize,
    board_calls: AtomicUsize,
    trip_calls: AtomicUsize,
    token_refreshes: AtomicUsize,
}

impl MockPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with a single matching stop.
    pub fn with_location(
        mut self,
        query: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.locations
            .entry(query.into())
            .or_default()
            .push(Location::new(id, name));
        self
    }

    pub fn with_board(self, board: Vec<DepartureEntry>) -> Self {
        Self {
            board: RwLock::new(board),
            ..self
        }
    }

    pub fn with_journeys(self, journeys: Vec<Journey>) -> Self {
        Self {
            journeys: RwLock::new(journeys),
            ..self
        }
    }

    /// Replace the departure board served from now on.
    pub async fn set_board(&self, board: Vec<DepartureEntry>) {
        *self.board.write().await = board;
    }

    /// Replace the journeys served from now on.
    pub async fn set_journeys(&self, journeys: Vec<Journey>) {
        *self.journeys.write().await = journeys;
    }

    /// Make board and trip queries fail with `Unauthorized`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn last_board_query(&self) -> Option<(String, Option<String>)> {
        self.last_board_query.read().await.clone()
    }

    pub async fn last_trip_query(&self) -> Option<(String, String)> {
        self.last_trip_query.read().await.clone()
    }

    pub async fn last_query_at(&self) -> Option<NaiveDateTime> {
        *self.last_query_at.read().await
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    pub fn board_calls(&self) -> usize {
        self.board_calls.load(Ordering::SeqCst)
    }

    pub fn trip_calls(&self) -> usize {
        self.trip_calls.load(Ordering::SeqCst)
    }

    pub fn token_refreshes(&self) -> usize {
        self.token_refreshes.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), PlannerError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(PlannerError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl JourneyPlanner for MockPlanner {
    async fn location_by_name(&self, query: &str) -> Result<Vec<Location>, PlannerError> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.locations.get(query).cloned().unwrap_or_default())
    }

    async fn departure_board(
        &self,
        station_id: &str,
        direction: Option<&str>,
        at: NaiveDateTime,
    ) -> Result<Vec<DepartureEntry>, PlannerError> {
        self.board_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_board_query.write().await =
            Some((station_id.to_string(), direction.map(str::to_string)));
        *self.last_query_at.write().await = Some(at);
        self.check_failing()?;
        Ok(self.board.read().await.clone())
    }

    async fn trip(
        &self,
        origin_id: &str,
        destination_id: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<Journey>, PlannerError> {
        self.trip_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_trip_query.write().await =
            Some((origin_id.to_string(), destination_id.to_string()));
        *self.last_query_at.write().await = Some(at);
        self.check_failing()?;
        Ok(self.journeys.read().await.clone())
    }

    async fn refresh_token(&self) -> Result<(), PlannerError> {
        self.token_refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
