//! # Record Store
//!
//! The capability the API consumes from its backend: single-predicate,
//! projected table scans and whole-item writes.
//!
//! Two adapters are provided:
//! - `MemoryStore` keeps tables in process memory
//! - `LocalStore` keeps one JSON file per table under a data directory

pub mod backend;
pub mod errors;
pub mod expression;
pub mod local;
pub mod memory;

pub use backend::{from_item, to_item, RecordStore};
pub use errors::{StoreError, StoreResult};
pub use expression::{FilterExpr, FilterOperator, Item, ScanExpression};
pub use local::LocalStore;
pub use memory::MemoryStore;
