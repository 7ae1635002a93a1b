/// Recurring ingestion of live readings into storage
use crate::domain::{zone_coordinates, NewAirQualityRecord};
use crate::errors::{ApiError, ApiResult};
use crate::services::AirQualityService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// The single zone polled on a schedule
const POLL_ZONE: &str = "paris";

pub struct AirQualityJob {
    service: Arc<AirQualityService>,
    poll_interval: Duration,
}

impl AirQualityJob {
    pub fn new(service: Arc<AirQualityService>) -> Self {
        Self {
            service,
            poll_interval: Duration::from_secs(60),
        }
    }

    /// Spawn the polling loop. Firings are serialized: the next tick is not
    /// taken until the previous firing finishes, and ticks missed while a
    /// firing is in flight are delayed rather than bursted. The loop exits
    /// when the shutdown signal fires.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                zone = POLL_ZONE,
                interval_secs = self.poll_interval.as_secs(),
                "starting air quality ingestion job"
            );
            let mut ticker = tokio::time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once().await {
                            error!(zone = POLL_ZONE, "ingestion firing failed: {e}");
                        }
                    }
                    _ = shutdown.changed() => {
                        info!("air quality ingestion job shutting down");
                        break;
                    }
                }
            }
        })
    }

    async fn run_once(&self) -> ApiResult<()> {
        let coords = zone_coordinates(POLL_ZONE)
            .ok_or_else(|| ApiError::Internal(format!("no coordinates for zone {POLL_ZONE}")))?;

        let reading = self
            .service
            .get_air_quality(coords.lon, coords.lat)
            .await?;

        let record = NewAirQualityRecord::from_reading(POLL_ZONE, &reading).ok_or_else(|| {
            ApiError::Internal("live reading is missing pollution fields".to_string())
        })?;

        let stored = self.service.insert_air_quality(record).await?;
        info!(
            id = %stored.id,
            zone = %stored.zone,
            aqius = %stored.aqius,
            "stored air quality reading"
        );
        Ok(())
    }
}
