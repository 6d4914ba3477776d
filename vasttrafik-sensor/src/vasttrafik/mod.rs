//! Västtrafik Reseplaneraren client.
//!
//! This module provides an HTTP client for the Västtrafik journey planner,
//! the trait the sensors consume it through, and an in-memory mock.
//!
//! Key characteristics of the API:
//! - OAuth client-credentials tokens, refreshed on demand
//! - Times are "HH:MM" strings in Swedish local time, dates "YYYY-MM-DD"
//! - Single results are not wrapped in arrays

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{JourneyPlanner, PlannerConfig, VasttrafikClient};
pub use error::PlannerError;
pub use mock::MockPlanner;
pub use types::{
    Departure, DepartureBoardResponse, Leg, LegStop, LocationNameResponse, StopLocation,
    TokenResponse, Trip, TripResponse,
};
