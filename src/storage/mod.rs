//! Storage Adapter Module
//!
//! Implements a polymorphic store for the single City entity.
//!
//! ## Core Concepts
//! - **Contract**: `CityStore` exposes connect / upsert / lookup and nothing
//!   else. The handlers only ever see this trait.
//! - **Normalization**: city names are lowercased before every storage
//!   operation, so `"Paris"` and `"PARIS"` address the same record.
//! - **Variants**: `RelationalStore` (MySQL row per city), `DocumentStore`
//!   (Elasticsearch document per city, keyed by normalized name) and
//!   `MemoryStore` (local development and tests).
//! - **Faults**: adapters catch their client library's errors and convert
//!   them to `StoreError` / a logged `None`; raw driver errors never reach
//!   the handlers.

pub mod document;
pub mod error;
pub mod memory;
pub mod relational;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use error::{ConnectError, StoreError};

/// Polymorphic storage contract shared by all backends.
///
/// One instance is created at startup and shared across requests behind an
/// `Arc`; adapters hold whatever long-lived connection handle their backend
/// needs and must be safe for concurrent use.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Establishes the connection/session and ensures the target schema or
    /// index exists, creating it if absent. Idempotent: safe to call when it
    /// already exists. Failure is non-fatal to startup, but the adapter is
    /// unusable until a later `connect` succeeds.
    async fn connect(&self) -> Result<(), ConnectError>;

    /// Atomic create-or-replace of the record keyed by the normalized name.
    async fn upsert_city(&self, name: &str, population: i64) -> Result<(), StoreError>;

    /// Point lookup by normalized name. Underlying faults are logged inside
    /// the adapter and surface as `None`; a true not-found is silent.
    async fn get_city_population(&self, name: &str) -> Option<i64>;
}

/// Deterministic key normalization applied before every storage operation.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}
