//! Document-index (Elasticsearch) storage adapter.
//!
//! One document per city, with the normalized name as the document ID. The
//! index itself guarantees at most one document per ID, so an upsert is a
//! single `PUT {index}/_doc/{id}` with no separate read step.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::{ConnectError, StoreError};
use super::{CityStore, normalize_name};
use crate::config::DocumentConfig;

/// Document stored in the index, keyed by the normalized city name.
#[derive(Debug, Serialize, Deserialize)]
pub struct CityDocument {
    pub name: String,
    pub population: i64,
}

/// Shape of the index's get-document response.
#[derive(Debug, Deserialize)]
struct GetDocumentResponse {
    found: bool,
    #[serde(rename = "_source")]
    source: Option<CityDocument>,
}

pub struct DocumentStore {
    http_client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    index_name: String,
}

impl DocumentStore {
    pub fn new(config: DocumentConfig) -> Self {
        // Credentials only count when both halves are configured.
        let credentials = match (config.username, config.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        };

        Self {
            http_client: reqwest::Client::new(),
            base_url: format!("http://{}:{}", config.host, config.port),
            credentials,
            index_name: config.index_name,
        }
    }

    pub(crate) fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_name)
    }

    pub(crate) fn document_url(&self, id: &str) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index_name, id)
    }

    pub(crate) fn authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    pub(crate) fn index_mapping() -> serde_json::Value {
        json!({
            "mappings": {
                "properties": {
                    "name": { "type": "keyword" },
                    "population": { "type": "long" }
                }
            }
        })
    }
}

#[async_trait]
impl CityStore for DocumentStore {
    async fn connect(&self) -> Result<(), ConnectError> {
        let exists = self
            .request(Method::HEAD, self.index_url())
            .send()
            .await?
            .status()
            .is_success();

        if !exists {
            let response = self
                .request(Method::PUT, self.index_url())
                .json(&Self::index_mapping())
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(ConnectError::IndexCreation(response.status()));
            }
            tracing::info!("Created index: {}", self.index_name);
        }

        tracing::info!("Connected to Elasticsearch at {}", self.base_url);
        Ok(())
    }

    async fn upsert_city(&self, name: &str, population: i64) -> Result<(), StoreError> {
        let name = normalize_name(name);
        let document = CityDocument {
            name: name.clone(),
            population,
        };

        let response = self
            .request(Method::PUT, self.document_url(&name))
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus(response.status()));
        }

        tracing::info!("Upserted city: {} with population: {}", name, population);
        Ok(())
    }

    async fn get_city_population(&self, name: &str) -> Option<i64> {
        let name = normalize_name(name);

        let response = match self
            .request(Method::GET, self.document_url(&name))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to get city population: {}", e);
                return None;
            }
        };

        // A missing document is expected, not an anomaly.
        if response.status() == StatusCode::NOT_FOUND {
            return None;
        }

        match response.json::<GetDocumentResponse>().await {
            Ok(body) if body.found => body.source.map(|document| document.population),
            Ok(_) => None,
            Err(e) => {
                tracing::error!("Failed to decode index response: {}", e);
                None
            }
        }
    }
}
