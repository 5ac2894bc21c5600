use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::protocol::{CityResponse, ErrorResponse, UpsertCityResponse};
use crate::storage::{CityStore, normalize_name};

/// Liveness probe. Intentionally does not probe the store: liveness is
/// process-level, not store-level.
pub async fn handle_health() -> &'static str {
    "OK"
}

/// Insert or update a city's population.
///
/// The body is taken as raw JSON and validated step by step: missing fields,
/// then integer coercion (JSON integers and integer strings both count), then
/// the non-negative range check. Every coercion failure is a 400.
pub async fn handle_upsert_city(
    Extension(store): Extension<Arc<dyn CityStore>>,
    Json(body): Json<Value>,
) -> Response {
    let (name, population) = match parse_upsert_body(&body) {
        Ok(parsed) => parsed,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    match store.upsert_city(&name, population).await {
        Ok(()) => {
            let name = normalize_name(&name);
            (
                StatusCode::OK,
                Json(UpsertCityResponse {
                    success: true,
                    message: format!("City {} updated with population {}", name, population),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to upsert city: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update city data".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Get a city's population by name.
pub async fn handle_get_city(
    Extension(store): Extension<Arc<dyn CityStore>>,
    Path(name): Path<String>,
) -> Response {
    let name = normalize_name(&name);

    match store.get_city_population(&name).await {
        Some(population) => {
            (StatusCode::OK, Json(CityResponse { name, population })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("City {} not found", name),
            }),
        )
            .into_response(),
    }
}

/// Boundary for anything that escapes the handlers: logged with detail,
/// converted to a generic 500 body. Internal error strings never reach the
/// caller.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Unhandled panic while serving request: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

fn parse_upsert_body(body: &Value) -> Result<(String, i64), String> {
    let (Some(name), Some(population)) = (body.get("name"), body.get("population")) else {
        return Err("Missing required fields: name and population".to_string());
    };

    let Some(name) = name.as_str() else {
        return Err("City name must be a string".to_string());
    };

    let population = coerce_population(population)?;
    if population < 0 {
        return Err("Population must be a non-negative integer".to_string());
    }

    Ok((name.to_string(), population))
}

/// JSON integers pass through; strings are parsed as integers. Floats, nulls
/// and everything else fail coercion.
fn coerce_population(value: &Value) -> Result<i64, String> {
    let invalid = || "Population must be a valid integer".to_string();

    match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
