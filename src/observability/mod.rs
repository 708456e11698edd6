//! # Observability
//!
//! Process-wide logging configuration. Events themselves are emitted with
//! `tracing` macros at their call sites.

pub mod logger;

pub use logger::{init_logging, LogFormat};
