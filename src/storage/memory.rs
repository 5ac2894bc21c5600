//! In-memory storage adapter.
//!
//! Backs `STORE_BACKEND=memory` for local development and acts as the test
//! double behind handler tests. Nothing survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;

use super::error::{ConnectError, StoreError};
use super::{CityStore, normalize_name};

#[derive(Default)]
pub struct MemoryStore {
    cities: DashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cities. Used by tests to assert that upserts never
    /// create duplicates and that rejected requests leave the store alone.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

#[async_trait]
impl CityStore for MemoryStore {
    async fn connect(&self) -> Result<(), ConnectError> {
        Ok(())
    }

    async fn upsert_city(&self, name: &str, population: i64) -> Result<(), StoreError> {
        let name = normalize_name(name);
        self.cities.insert(name.clone(), population);
        tracing::info!("Upserted city: {} with population: {}", name, population);
        Ok(())
    }

    async fn get_city_population(&self, name: &str) -> Option<i64> {
        self.cities
            .get(&normalize_name(name))
            .map(|entry| *entry.value())
    }
}
