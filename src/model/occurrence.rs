//! # Occurrence Records
//!
//! A geolocated sighting of a species on a given day.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Entity;

/// Attribute holding the occurrence identifier
pub const OCCURRENCE_ID: &str = "OccurrenceID";

/// Attribute holding the observation date (`YYYY-MM-DD`)
pub const DATE: &str = "Date";

/// Attribute holding the accuracy fraction in [0, 1]
pub const ACCURACY: &str = "Accuracy";

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

/// Attribute holding the referenced species identifier
pub const PLANT_ID: &str = "PlantID";

/// Format of `observed_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An occurrence of a species.
///
/// `species_id` is expected to reference an existing species but dangling
/// references are stored as given. Missing attributes decode to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Occurrence {
    /// Server-assigned; whatever a client submits is overwritten on write.
    #[serde(rename = "OccurrenceID")]
    pub occurrence_id: String,

    #[serde(rename = "Date")]
    pub observed_date: String,

    #[serde(rename = "Accuracy")]
    pub accuracy: f64,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,

    #[serde(rename = "PlantID")]
    pub species_id: i64,
}

impl Occurrence {
    /// Replace the identifier with a freshly generated one
    pub fn with_fresh_id(mut self) -> Self {
        self.occurrence_id = new_occurrence_id();
        self
    }
}

impl Entity for Occurrence {
    const ATTRIBUTES: &'static [&'static str] =
        &[OCCURRENCE_ID, DATE, ACCURACY, LATITUDE, LONGITUDE, PLANT_ID];
}

/// Generate an occurrence identifier from the current time.
///
/// Uniqueness is probabilistic: two writes in the same nanosecond collide.
pub fn new_occurrence_id() -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000));
    occurrence_id_at(nanos)
}

/// Hex-encoded SHA-256 digest of a nanosecond timestamp
pub fn occurrence_id_at(unix_nanos: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(unix_nanos.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_is_hex_sha256() {
        let id = occurrence_id_at(1_600_000_000_000_000_000);
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, occurrence_id_at(1_600_000_000_000_000_000));
        assert_ne!(id, occurrence_id_at(1_600_000_000_000_000_001));
    }

    #[test]
    fn test_fresh_id_overwrites_client_value() {
        let occurrence = Occurrence {
            occurrence_id: "client-chosen".to_string(),
            observed_date: "2020-05-01".to_string(),
            accuracy: 0.5,
            latitude: 37.0,
            longitude: -122.0,
            species_id: 2,
        }
        .with_fresh_id();

        assert_ne!(occurrence.occurrence_id, "client-chosen");
        assert_eq!(occurrence.occurrence_id.len(), 64);
    }

    #[test]
    fn test_identifier_optional_on_decode() {
        let occurrence: Occurrence = serde_json::from_value(json!({
            "Date": "2020-05-01",
            "Accuracy": 0.9,
            "Latitude": 37.1,
            "Longitude": -122.3,
            "PlantID": 4
        }))
        .unwrap();

        assert!(occurrence.occurrence_id.is_empty());
        assert_eq!(occurrence.species_id, 4);
    }

    #[test]
    fn test_missing_fields_zero_filled() {
        let occurrence: Occurrence = serde_json::from_value(json!({
            "Date": "2020-05-01",
            "PlantID": 4
        }))
        .unwrap();

        assert_eq!(occurrence.observed_date, "2020-05-01");
        assert_eq!(occurrence.species_id, 4);
        assert_eq!(occurrence.accuracy, 0.0);
        assert_eq!(occurrence.latitude, 0.0);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result: Result<Occurrence, _> = serde_json::from_value(json!({
            "Date": "2020-05-01",
            "PlantID": "four"
        }));
        assert!(result.is_err());
    }
}
