//! Seed file loading and occurrence synthesis

use std::collections::HashSet;
use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::errors::{SeedError, SeedResult};
use crate::model::occurrence::DATE_FORMAT;
use crate::model::{new_occurrence_id, Occurrence, Species};
use crate::store::{to_item, RecordStore};

/// Dates are shifted forward by up to this many days, exclusive
pub const MAX_DATE_OFFSET_DAYS: u64 = 50;

/// A partially populated occurrence from a seed file.
///
/// Identifier and accuracy are synthesized; coordinates are jittered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedOccurrence {
    #[serde(rename = "Date")]
    pub observed_date: String,

    #[serde(rename = "Latitude", default)]
    pub latitude: f64,

    #[serde(rename = "Longitude", default)]
    pub longitude: f64,

    #[serde(rename = "PlantID")]
    pub species_id: i64,
}

/// Read a JSON array of records
pub async fn load_seed_file<T: DeserializeOwned>(path: &Path) -> SeedResult<Vec<T>> {
    let raw = tokio::fs::read(path).await.map_err(|e| SeedError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_slice(&raw).map_err(|e| SeedError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Fill in a seed record: random 0-49 day date offset, uniform accuracy in
/// [0, 1), and a uniform [0, 1) offset on each coordinate.
pub fn synthesize<R: Rng>(
    seed: SeedOccurrence,
    occurrence_id: String,
    rng: &mut R,
) -> SeedResult<Occurrence> {
    let date = NaiveDate::parse_from_str(&seed.observed_date, DATE_FORMAT)
        .map_err(|e| SeedError::InvalidDate(format!("{:?}: {}", seed.observed_date, e)))?;
    let shifted = date
        .checked_add_days(Days::new(rng.gen_range(0..MAX_DATE_OFFSET_DAYS)))
        .ok_or_else(|| SeedError::InvalidDate(seed.observed_date.clone()))?;

    Ok(Occurrence {
        occurrence_id,
        observed_date: shifted.format(DATE_FORMAT).to_string(),
        accuracy: rng.gen::<f64>(),
        latitude: seed.latitude + rng.gen::<f64>(),
        longitude: seed.longitude + rng.gen::<f64>(),
        species_id: seed.species_id,
    })
}

/// Time-derived identifier not yet handed out in this batch
fn unique_id(issued: &mut HashSet<String>) -> String {
    loop {
        let id = new_occurrence_id();
        if issued.insert(id.clone()) {
            return id;
        }
    }
}

/// Synthesize and write every seed occurrence. Stops at the first failure.
pub async fn seed_occurrences<S, R>(
    store: &S,
    table: &str,
    records: Vec<SeedOccurrence>,
    rng: &mut R,
) -> SeedResult<usize>
where
    S: RecordStore + ?Sized,
    R: Rng,
{
    let mut issued = HashSet::with_capacity(records.len());
    let mut written = 0;

    for seed in records {
        let occurrence = synthesize(seed, unique_id(&mut issued), rng)?;
        store.put(table, to_item(&occurrence)?).await?;
        debug!(table, occurrence_id = %occurrence.occurrence_id, "seeded occurrence");
        written += 1;
    }

    info!(table, written, "occurrence seeding complete");
    Ok(written)
}

/// Write species records as given
pub async fn seed_species<S>(store: &S, table: &str, records: Vec<Species>) -> SeedResult<usize>
where
    S: RecordStore + ?Sized,
{
    let mut written = 0;
    for species in &records {
        store.put(table, to_item(species)?).await?;
        written += 1;
    }

    info!(table, written, "species seeding complete");
    Ok(written)
}
