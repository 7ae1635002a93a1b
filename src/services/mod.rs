/// Business logic services layer
use crate::clients::AirVisualClient;
use crate::domain::{AirQualityRecord, NewAirQualityRecord};
use crate::errors::{ApiError, ApiResult, ERROR_RECORDS_NOT_EXIST};
use crate::repo::AirQualityRepo;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::error;

/// Air quality service: live readings via the upstream client, history via
/// the repository.
pub struct AirQualityService {
    repo: AirQualityRepo,
    client: AirVisualClient,
}

impl AirQualityService {
    pub fn new(repo: AirQualityRepo, client: AirVisualClient) -> Self {
        Self { repo, client }
    }

    /// Live reading for a coordinate: the upstream `data.current` payload,
    /// passed through verbatim.
    pub async fn get_air_quality(&self, lon: f64, lat: f64) -> ApiResult<Value> {
        self.client.fetch_nearest_city(lon, lat).await
    }

    /// Persist one reading. The AQI values are validated here, once, so the
    /// most-polluted computation never has to deal with unparsable rows.
    pub async fn insert_air_quality(
        &self,
        record: NewAirQualityRecord,
    ) -> ApiResult<AirQualityRecord> {
        validate_indices(&record)?;
        self.repo.insert(&record).await.map_err(|e| {
            error!(zone = %record.zone, "failed to insert air quality record: {e}");
            e
        })
    }

    /// Timestamp of the reading with the highest US AQI for a zone. A zone
    /// with no stored readings is reported as not found, carrying the
    /// sentinel message the HTTP layer maps to 404.
    pub async fn get_most_polluted_time(&self, zone: &str) -> ApiResult<DateTime<Utc>> {
        let records = self.repo.get_by_zone(zone).await?;
        most_polluted_timestamp(&records)
            .ok_or_else(|| ApiError::NotFound(ERROR_RECORDS_NOT_EXIST.to_string()))
    }
}

fn validate_indices(record: &NewAirQualityRecord) -> ApiResult<()> {
    for (field, value) in [("aqius", &record.aqius), ("aqicn", &record.aqicn)] {
        if value.parse::<i64>().is_err() {
            return Err(ApiError::InvalidInput(format!(
                "{field} must be a base-10 integer, got {value:?}"
            )));
        }
    }
    Ok(())
}

/// Maximum over the records' `aqius` values, parsed as integers. Rows that
/// fail to parse (only possible for rows written outside the service) sort
/// lowest. Ties are broken arbitrarily.
fn most_polluted_timestamp(records: &[AirQualityRecord]) -> Option<DateTime<Utc>> {
    records
        .iter()
        .max_by_key(|r| r.aqius.parse::<i64>().unwrap_or(i64::MIN))
        .map(|r| r.timestamp)
}
