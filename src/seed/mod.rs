//! # Bulk Seeding
//!
//! One-off loading of species and occurrence records from JSON files into
//! the record store. Seeded occurrences go through the same item shape as
//! the live write path.

pub mod errors;
pub mod loader;

pub use errors::{SeedError, SeedResult};
pub use loader::{load_seed_file, seed_occurrences, seed_species, synthesize, SeedOccurrence};
