//! # REST API Module
//!
//! HTTP endpoints for plant species and occurrence records:
//!
//! - `GET /species` with optional `common`, `scientific` or `id`
//! - `GET /occurrences` with optional `id`, `datefrom`, `dateto`, `acc`
//! - `POST /occurrences` with an occurrence body
//!
//! Every response carries `Access-Control-Allow-Origin: *`.

pub mod compiler;
pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod router;
pub mod server;
pub mod service;

pub use compiler::{AcceptAll, CompiledQuery, OccurrenceWindow, Queryable, ResidualFilter};
pub use errors::{ApiError, ApiResult};
pub use handler::{ApiRequest, RequestDispatcher, Resource, TableNames};
pub use parser::{OccurrenceQuery, QueryParams, SpeciesQuery, SpeciesSelector};
pub use response::ApiReply;
pub use router::{clean_path, expect_end, shift_path, PathRouter};
pub use server::RestServer;
pub use service::{QueryResult, QueryService};
