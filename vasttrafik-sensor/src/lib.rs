//! Västtrafik departure and trip sensors.
//!
//! Polls the Västtrafik journey planner and exposes the next departure from
//! a station, or the next journey between two stations, as sensors with a
//! display state and attributes. Each sensor throttles its own API calls.

pub mod config;
pub mod domain;
pub mod sensor;
pub mod stations;
pub mod throttle;
pub mod vasttrafik;
