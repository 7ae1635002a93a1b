/// Repository layer for database operations
use crate::domain::{AirQualityRecord, NewAirQualityRecord};
use crate::errors::ApiResult;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

type AirQualityRow = (Uuid, String, String, String, String, String, DateTime<Utc>);

fn record_from_row(
    (id, zone, aqius, mainus, aqicn, maincn, timestamp): AirQualityRow,
) -> AirQualityRecord {
    AirQualityRecord {
        id,
        zone,
        aqius,
        mainus,
        aqicn,
        maincn,
        timestamp,
    }
}

/// Air quality readings repository
#[derive(Clone)]
pub struct AirQualityRepo {
    pool: PgPool,
}

impl AirQualityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one reading; the database assigns `id` and `timestamp` and the
    /// full stored row is echoed back.
    pub async fn insert(&self, record: &NewAirQualityRecord) -> ApiResult<AirQualityRecord> {
        debug!(zone = %record.zone, "inserting air quality record");
        let row = sqlx::query_as::<_, AirQualityRow>(
            "INSERT INTO airquality(zone, aqius, mainus, aqicn, maincn)
             VALUES($1, $2, $3, $4, $5)
             RETURNING id, zone, aqius, mainus, aqicn, maincn, timestamp",
        )
        .bind(&record.zone)
        .bind(&record.aqius)
        .bind(&record.mainus)
        .bind(&record.aqicn)
        .bind(&record.maincn)
        .fetch_one(&self.pool)
        .await?;

        Ok(record_from_row(row))
    }

    /// All readings for a zone, in storage order. An unknown zone yields an
    /// empty Vec; the service decides what that means.
    pub async fn get_by_zone(&self, zone: &str) -> ApiResult<Vec<AirQualityRecord>> {
        let rows = sqlx::query_as::<_, AirQualityRow>(
            "SELECT id, zone, aqius, mainus, aqicn, maincn, timestamp
             FROM airquality WHERE zone = $1",
        )
        .bind(zone)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(record_from_row).collect())
    }
}

/// Initialize database tables. Idempotent: create-if-not-exists, no drop, so
/// readings survive restarts.
pub async fn init_db(pool: &PgPool) -> ApiResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS airquality(
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            zone VARCHAR(50) NOT NULL,
            aqius VARCHAR(50) NOT NULL,
            mainus VARCHAR(50) NOT NULL,
            aqicn VARCHAR(50) NOT NULL,
            maincn VARCHAR(50) NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS ix_airquality_zone ON airquality(zone)")
        .execute(pool)
        .await?;

    Ok(())
}
