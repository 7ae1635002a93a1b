/// External API clients module
use crate::config::AirQualityClientConfig;
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("airq-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Client for the AirVisual nearest-city endpoint
pub struct AirVisualClient {
    http_client: HttpClient,
    base_url: String,
    nearest_city_endpoint: String,
    api_key: String,
}

impl AirVisualClient {
    pub fn new(config: AirQualityClientConfig) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url: config.base_url,
            nearest_city_endpoint: config.nearest_city_endpoint,
            api_key: config.api_key,
        })
    }

    /// Fetch the current reading for the city nearest to the coordinate.
    /// Returns the `data.current` object, which carries the `pollution` and
    /// `weather` sub-objects.
    pub async fn fetch_nearest_city(&self, lon: f64, lat: f64) -> ApiResult<Value> {
        let url = format!("{}/{}", self.base_url, self.nearest_city_endpoint);
        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("lat", &lat.to_string()),
                ("lon", &lon.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json: Value = resp.json().await?;
        json.get("data")
            .and_then(|d| d.get("current"))
            .cloned()
            .ok_or_else(|| {
                ApiError::Internal("nearest-city response missing data.current".to_string())
            })
    }
}
