//! # Record Model
//!
//! The two entities served by the API and the attribute names they use in the
//! backing store.

pub mod occurrence;
pub mod species;

pub use occurrence::{new_occurrence_id, occurrence_id_at, Occurrence};
pub use species::Species;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type that can be stored in and scanned from a table.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Store attribute names making up this entity.
    ///
    /// Scans project onto exactly these attributes so that nothing else held
    /// in the backend item is fetched or exposed.
    const ATTRIBUTES: &'static [&'static str];
}
