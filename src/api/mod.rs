//! HTTP API Module
//!
//! The request handling layer: a stateless, linear pipeline per request.
//!
//! ## Core Concepts
//! - **Validation**: the upsert body is checked field by field so that every
//!   rejection carries the service's own error message, not the framework's.
//! - **Normalization**: city names are lowercased at this boundary and echoed
//!   back normalized.
//! - **Outcome mapping**: adapter results become HTTP status codes here;
//!   store faults surface as a generic 500 with the cause logged server-side.

pub mod handlers;
pub mod protocol;
