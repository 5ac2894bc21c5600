//! Service Configuration
//!
//! All settings come from environment variables with local-development
//! defaults, so `cargo run` against a local MySQL or Elasticsearch works
//! without any setup. The store backend is selected by `STORE_BACKEND`.

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Which storage adapter the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MySQL table, one row per city.
    Relational,
    /// Elasticsearch index, one document per city.
    DocumentIndex,
    /// In-memory map, for local development and tests. Not persistent.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "relational" => Ok(Self::Relational),
            "elasticsearch" | "document" => Ok(Self::DocumentIndex),
            "memory" => Ok(Self::Memory),
            other => bail!(
                "Unknown STORE_BACKEND '{}' (expected mysql, elasticsearch or memory)",
                other
            ),
        }
    }
}

/// Connection settings for the relational (MySQL) adapter.
#[derive(Debug, Clone)]
pub struct RelationalConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

/// Connection settings for the document-index (Elasticsearch) adapter.
///
/// Credentials are optional: when either one is absent the connection is
/// unauthenticated.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub index_name: String,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub relational: RelationalConfig,
    pub document: DocumentConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_string("BIND_ADDR", "0.0.0.0:5000")
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a valid host:port")?;

        let backend = env_string("STORE_BACKEND", "mysql").parse::<StoreBackend>()?;

        let relational = RelationalConfig {
            host: env_string("MYSQL_HOST", "localhost"),
            port: env_string("MYSQL_PORT", "3306")
                .parse()
                .context("MYSQL_PORT must be a valid port number")?,
            username: env_string("MYSQL_USER", "root"),
            password: env_string("MYSQL_PASSWORD", "password"),
            database: env_string("MYSQL_DATABASE", "citydb"),
            max_connections: env_string("MYSQL_MAX_CONNECTIONS", "5")
                .parse()
                .context("MYSQL_MAX_CONNECTIONS must be u32")?,
        };

        let document = DocumentConfig {
            host: env_string("ELASTICSEARCH_HOST", "localhost"),
            port: env_string("ELASTICSEARCH_PORT", "9200")
                .parse()
                .context("ELASTICSEARCH_PORT must be a valid port number")?,
            username: env_opt("ELASTICSEARCH_USER"),
            password: env_opt("ELASTICSEARCH_PASSWORD"),
            index_name: env_string("ELASTICSEARCH_INDEX", "cities"),
        };

        Ok(Self {
            bind_addr,
            backend,
            relational,
            document,
        })
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Empty values count as unset, matching the unauthenticated default.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
