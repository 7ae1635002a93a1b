/// HTTP request handlers
use crate::domain::Health;
use crate::errors::{ApiError, ApiResult};
use crate::services::AirQualityService;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub air_quality_service: Arc<AirQualityService>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Current air quality for a coordinate, straight from the upstream API
pub async fn get_air_quality(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let lat = require_number(&params, "lat");
    let lon = require_number(&params, "lon");
    let (lat, lon) = combine(lat, lon)?;

    let payload = state.air_quality_service.get_air_quality(lon, lat).await?;
    Ok(Json(serde_json::json!({ "result": payload })))
}

/// Timestamp at which a zone's stored pollution peaked
pub async fn get_most_polluted_time(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let zone = params
        .get("zone")
        .map(String::as_str)
        .filter(|z| !z.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidInput("query parameter \"zone\" is required".to_string())
        })?;

    let timestamp = state
        .air_quality_service
        .get_most_polluted_time(zone)
        .await?;
    Ok(Json(serde_json::json!({ "result": timestamp })))
}

fn require_number(params: &HashMap<String, String>, key: &str) -> Result<f64, String> {
    match params.get(key) {
        None => Err(format!("\"{key}\" is required")),
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| format!("\"{key}\" must be a number")),
    }
}

/// Merge the two coordinate validations so a 400 names every invalid field
fn combine(lat: Result<f64, String>, lon: Result<f64, String>) -> ApiResult<(f64, f64)> {
    match (lat, lon) {
        (Ok(lat), Ok(lon)) => Ok((lat, lon)),
        (lat, lon) => {
            let problems: Vec<String> = [lat.err(), lon.err()].into_iter().flatten().collect();
            Err(ApiError::InvalidInput(format!(
                "invalid query parameters: {}",
                problems.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_number_missing() {
        let params = HashMap::new();
        assert_eq!(
            require_number(&params, "lat"),
            Err("\"lat\" is required".to_string())
        );
    }

    #[test]
    fn test_require_number_non_numeric() {
        let params = HashMap::from([("lat".to_string(), "invalid".to_string())]);
        assert_eq!(
            require_number(&params, "lat"),
            Err("\"lat\" must be a number".to_string())
        );
    }

    #[test]
    fn test_require_number_valid() {
        let params = HashMap::from([("lon".to_string(), "-74.0060".to_string())]);
        assert_eq!(require_number(&params, "lon"), Ok(-74.0060));
    }

    #[test]
    fn test_combine_reports_both_fields() {
        let err = combine(
            Err("\"lat\" is required".to_string()),
            Err("\"lon\" must be a number".to_string()),
        )
        .unwrap_err();
        match err {
            ApiError::InvalidInput(msg) => {
                assert!(msg.contains("\"lat\" is required"));
                assert!(msg.contains("\"lon\" must be a number"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
