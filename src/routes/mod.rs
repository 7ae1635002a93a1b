/// Application routes configuration
use crate::handlers::{get_air_quality, get_most_polluted_time, health, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/airquality", get(get_air_quality))
        .route("/pollutedtime", get(get_most_polluted_time))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::AirVisualClient;
    use crate::config::{AirQualityClientConfig, DatabaseConfig};
    use crate::repo::AirQualityRepo;
    use crate::services::AirQualityService;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    // Lazy pool: no connection is attempted until a query runs, and the
    // validation paths below reject before any query.
    fn test_router() -> Router {
        let db = DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            name: "postgres".to_string(),
            username: "postgres".to_string(),
            password: "admin".to_string(),
            pool_size: 1,
        };
        let pool = PgPoolOptions::new()
            .max_connections(db.pool_size)
            .connect_lazy_with(db.connect_options());

        let client = AirVisualClient::new(AirQualityClientConfig {
            base_url: "http://localhost:1".to_string(),
            nearest_city_endpoint: "nearest_city".to_string(),
            api_key: String::new(),
        })
        .unwrap();

        let service = AirQualityService::new(AirQualityRepo::new(pool), client);
        build_router(AppState {
            air_quality_service: Arc::new(service),
        })
    }

    async fn status_for(uri: &str) -> StatusCode {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(status_for("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_airquality_missing_params() {
        assert_eq!(status_for("/airquality").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_airquality_non_numeric_params() {
        assert_eq!(
            status_for("/airquality?lat=invalid&lon=invalid").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_airquality_missing_lon_only() {
        assert_eq!(
            status_for("/airquality?lat=48.85").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_pollutedtime_missing_zone() {
        assert_eq!(status_for("/pollutedtime").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pollutedtime_empty_zone() {
        assert_eq!(
            status_for("/pollutedtime?zone=").await,
            StatusCode::BAD_REQUEST
        );
    }
}
