//! HTTP API Protocol
//!
//! Defines the endpoint paths and Data Transfer Objects (DTOs) of the
//! service's JSON surface.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Liveness probe; never touches the store.
pub const ENDPOINT_HEALTH: &str = "/health";
/// Idempotent upsert of a city's population (PUT or POST).
pub const ENDPOINT_CITY: &str = "/city";
/// Point lookup of a city's population by name.
pub const ENDPOINT_CITY_BY_NAME: &str = "/city/:name";

// --- Data Transfer Objects ---

/// Acknowledgment for a successful upsert.
///
/// Echoes the normalized name and stored population in `message`, confirming
/// what was actually written.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertCityResponse {
    pub success: bool,
    pub message: String,
}

/// A city and its stored population, as returned by a lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct CityResponse {
    /// The normalized (lowercase) city name.
    pub name: String,
    pub population: i64,
}

/// Error body for every failure response.
///
/// For validation failures `error` names the specific violation; for server
/// faults it stays generic and the detail goes to the logs only.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
