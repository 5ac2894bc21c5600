//! Relational (MySQL) storage adapter.
//!
//! One row per city in the `cities` table, unique on the normalized name.
//! Upserts run as a point lookup followed by update-or-insert inside a single
//! transaction, leaning on the row-level atomicity of the database rather
//! than any service-level locking.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::sync::RwLock;

use super::error::{ConnectError, StoreError};
use super::{CityStore, normalize_name};
use crate::config::RelationalConfig;

const CREATE_CITIES_TABLE: &str = "CREATE TABLE IF NOT EXISTS cities (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    population BIGINT NOT NULL
)";

pub struct RelationalStore {
    config: RelationalConfig,
    // None until connect() succeeds; every operation checks.
    pool: RwLock<Option<MySqlPool>>,
}

impl RelationalStore {
    pub fn new(config: RelationalConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    async fn pool(&self) -> Option<MySqlPool> {
        self.pool.read().await.clone()
    }
}

#[async_trait]
impl CityStore for RelationalStore {
    async fn connect(&self) -> Result<(), ConnectError> {
        let options = MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.username)
            .password(&self.config.password)
            .database(&self.config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(self.config.max_connections)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_CITIES_TABLE).execute(&pool).await?;

        // Connection info logged without the password.
        tracing::info!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            "Connected to MySQL database"
        );

        *self.pool.write().await = Some(pool);
        Ok(())
    }

    async fn upsert_city(&self, name: &str, population: i64) -> Result<(), StoreError> {
        let pool = self.pool().await.ok_or(StoreError::NotConnected)?;
        let name = normalize_name(name);

        // Any `?` below drops the transaction, which rolls it back and
        // returns the connection to the pool.
        let mut tx = pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM cities WHERE name = ?")
            .bind(&name)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            sqlx::query("UPDATE cities SET population = ? WHERE name = ?")
                .bind(population)
                .bind(&name)
                .execute(&mut *tx)
                .await?;
            tracing::info!("Updated city: {} with population: {}", name, population);
        } else {
            sqlx::query("INSERT INTO cities (name, population) VALUES (?, ?)")
                .bind(&name)
                .bind(population)
                .execute(&mut *tx)
                .await?;
            tracing::info!("Created city: {} with population: {}", name, population);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_city_population(&self, name: &str) -> Option<i64> {
        let Some(pool) = self.pool().await else {
            tracing::error!("City lookup attempted without a database connection");
            return None;
        };
        let name = normalize_name(name);

        match sqlx::query("SELECT population FROM cities WHERE name = ?")
            .bind(&name)
            .fetch_optional(&pool)
            .await
        {
            Ok(Some(row)) => match row.try_get("population") {
                Ok(population) => Some(population),
                Err(e) => {
                    tracing::error!("Failed to decode population column: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to get city population: {}", e);
                None
            }
        }
    }
}
