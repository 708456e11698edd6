//! # Request Dispatcher
//!
//! Routes a request to its resource handler and turns the outcome into a
//! reply. Handlers share nothing mutable; each request carries its own
//! `ApiRequest` down the call chain.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;
use serde_json::{Map, Value};
use tracing::{error, warn};

use super::errors::{ApiError, ApiResult};
use super::parser::QueryParams;
use super::response::ApiReply;
use super::router::{expect_end, PathRouter};
use super::service::QueryService;
use crate::model::{Entity, Occurrence, Species};
use crate::store::RecordStore;

/// Top-level resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Species,
    Occurrences,
}

/// Backing table for each resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub species: String,
    pub occurrences: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            species: "Plants".to_string(),
            occurrences: "Occurrences".to_string(),
        }
    }
}

/// One inbound request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: QueryParams,
    pub body: Bytes,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::default(),
            body: Bytes::new(),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// Dispatches requests for both resources over one store
pub struct RequestDispatcher<S: RecordStore> {
    router: PathRouter<Resource>,
    service: QueryService<S>,
    tables: TableNames,
}

impl<S: RecordStore> RequestDispatcher<S> {
    pub fn new(store: Arc<S>, tables: TableNames) -> Self {
        Self {
            router: PathRouter::new()
                .route("species", Resource::Species)
                .route("occurrences", Resource::Occurrences),
            service: QueryService::new(store),
            tables,
        }
    }

    /// Handle one request
    pub async fn dispatch(&self, request: &ApiRequest) -> ApiReply {
        let result = match self.router.resolve(&request.path) {
            Ok((Resource::Species, tail)) => self.species(request, &tail).await,
            Ok((Resource::Occurrences, tail)) => self.occurrences(request, &tail).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            let status = e.status_code();
            if status.is_server_error() {
                error!(method = %request.method, path = %request.path, error = %e, "request failed");
            } else {
                warn!(method = %request.method, path = %request.path, status = status.as_u16(), error = %e, "request rejected");
            }
        }
        ApiReply::from(result)
    }

    async fn species(&self, request: &ApiRequest, tail: &str) -> ApiResult<ApiReply> {
        match request.method {
            Method::GET => {
                expect_end(tail)?;
                let result = self
                    .service
                    .query::<Species>(&self.tables.species, &request.params)
                    .await?;
                Ok(ApiReply::json(&result.records))
            }
            Method::POST => Err(ApiError::MethodNotAllowed("POST not implemented")),
            _ => Err(ApiError::MethodNotAllowed("Only GET and POST are allowed")),
        }
    }

    async fn occurrences(&self, request: &ApiRequest, tail: &str) -> ApiResult<ApiReply> {
        match request.method {
            Method::GET => {
                expect_end(tail)?;
                let result = self
                    .service
                    .query::<Occurrence>(&self.tables.occurrences, &request.params)
                    .await?;
                Ok(ApiReply::json(&result.records))
            }
            Method::POST => self.create_occurrence(request, tail).await,
            _ => Err(ApiError::MethodNotAllowed("Only GET and POST are allowed")),
        }
    }

    /// Store the submitted occurrence. Success is an empty 200.
    async fn create_occurrence(&self, request: &ApiRequest, tail: &str) -> ApiResult<ApiReply> {
        expect_end(tail)?;

        let occurrence = decode_occurrence(&request.body)?;

        self.service
            .record_occurrence(&self.tables.occurrences, occurrence)
            .await?;
        Ok(ApiReply::Empty)
    }
}

/// Decode an occurrence body leniently.
///
/// Only the first JSON value is read. Attribute names match without regard
/// to ASCII case, with an exact match taking priority. Missing or null
/// attributes take zero values and unknown ones are ignored.
fn decode_occurrence(body: &[u8]) -> ApiResult<Occurrence> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| ApiError::InvalidBody("empty body".to_string()))?
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let value = match value {
        Value::Object(fields) => Value::Object(canonical_attributes::<Occurrence>(fields)),
        Value::Null => return Ok(Occurrence::default()),
        other => other,
    };

    serde_json::from_value(value).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Rename fields to the entity's attribute names, dropping nulls and unknowns
fn canonical_attributes<E: Entity>(fields: Map<String, Value>) -> Map<String, Value> {
    let mut canonical = Map::new();
    for (key, value) in fields {
        if value.is_null() {
            continue;
        }
        match E::ATTRIBUTES.iter().find(|attr| attr.eq_ignore_ascii_case(&key)) {
            Some(attr) if *attr == key => {
                canonical.insert(key, value);
            }
            Some(attr) => {
                canonical.entry(attr.to_string()).or_insert(value);
            }
            None => {}
        }
    }
    canonical
}
