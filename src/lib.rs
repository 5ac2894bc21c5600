//! City Population Service Library
//!
//! This library crate defines the core modules that make up the HTTP service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems:
//!
//! - **`api`**: The request handling layer. Validates and normalizes input,
//!   delegates to the storage adapter, and maps outcomes to HTTP responses.
//! - **`config`**: Environment-driven configuration with local-development
//!   defaults, including the store backend selection.
//! - **`storage`**: The persistence layer. A polymorphic `CityStore` adapter
//!   over a relational database (MySQL), a document index (Elasticsearch),
//!   or an in-memory map.

pub mod api;
pub mod config;
pub mod storage;
