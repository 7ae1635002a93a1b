/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::utils::string_field;

/// A persisted air quality reading. `id` and `timestamp` are assigned by the
/// database; rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityRecord {
    pub id: Uuid,
    pub zone: String,
    pub aqius: String,
    pub mainus: String,
    pub aqicn: String,
    pub maincn: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload for a new reading: the zone plus the four pollution index
/// fields pulled from a live reading.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAirQualityRecord {
    pub zone: String,
    pub aqius: String,
    pub mainus: String,
    pub aqicn: String,
    pub maincn: String,
}

impl NewAirQualityRecord {
    /// Build an insert payload from the `pollution` object of a live
    /// reading (the upstream `data.current` value). Returns `None` when any
    /// pollution field is missing.
    pub fn from_reading(zone: &str, reading: &Value) -> Option<Self> {
        let pollution = reading.get("pollution")?;
        Some(Self {
            zone: zone.to_string(),
            aqius: string_field(pollution, "aqius")?,
            mainus: string_field(pollution, "mainus")?,
            aqicn: string_field(pollution, "aqicn")?,
            maincn: string_field(pollution, "maincn")?,
        })
    }
}

/// A polling location
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// Static zone lookup used by the ingestion job
pub fn zone_coordinates(zone: &str) -> Option<Coordinates> {
    match zone {
        "paris" => Some(Coordinates {
            lon: 2.352222,
            lat: 48.856613,
        }),
        _ => None,
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_reading() -> Value {
        serde_json::json!({
            "pollution": {
                "ts": "2023-11-22T17:00:00.000Z",
                "aqius": 78,
                "mainus": "p2",
                "aqicn": 36,
                "maincn": "p2"
            },
            "weather": {
                "ts": "2023-11-22T17:00:00.000Z",
                "tp": 12,
                "pr": 1016,
                "hu": 88
            }
        })
    }

    #[test]
    fn test_record_from_reading() {
        let record = NewAirQualityRecord::from_reading("paris", &live_reading()).unwrap();
        assert_eq!(
            record,
            NewAirQualityRecord {
                zone: "paris".to_string(),
                aqius: "78".to_string(),
                mainus: "p2".to_string(),
                aqicn: "36".to_string(),
                maincn: "p2".to_string(),
            }
        );
    }

    #[test]
    fn test_record_from_reading_missing_pollution() {
        let reading = serde_json::json!({"weather": {"tp": 12}});
        assert_eq!(NewAirQualityRecord::from_reading("paris", &reading), None);
    }

    #[test]
    fn test_record_from_reading_missing_field() {
        let reading = serde_json::json!({"pollution": {"aqius": 78, "mainus": "p2"}});
        assert_eq!(NewAirQualityRecord::from_reading("paris", &reading), None);
    }

    #[test]
    fn test_zone_coordinates_known() {
        let coords = zone_coordinates("paris").unwrap();
        assert!((coords.lon - 2.352222).abs() < f64::EPSILON);
        assert!((coords.lat - 48.856613).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zone_coordinates_unknown() {
        assert!(zone_coordinates("atlantis").is_none());
    }
}
