//! # Query Service
//!
//! Compiles request parameters, scans the store and applies the residual
//! filter. Also owns the occurrence write path.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::compiler::{Queryable, ResidualFilter};
use super::errors::ApiResult;
use super::parser::QueryParams;
use crate::model::{Entity, Occurrence};
use crate::store::{from_item, to_item, RecordStore, ScanExpression};

/// Records returned by a query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<E> {
    pub records: Vec<E>,

    /// Number of records after residual filtering
    pub count: usize,
}

/// Read and write operations over a shared record store
pub struct QueryService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> QueryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Query `table` for records of type `E`
    pub async fn query<E: Queryable>(
        &self,
        table: &str,
        params: &QueryParams,
    ) -> ApiResult<QueryResult<E>> {
        self.query_at(table, params, Local::now()).await
    }

    /// Query with an explicit current time for open-ended date windows.
    ///
    /// A single undecodable item fails the whole query.
    pub async fn query_at<E: Queryable>(
        &self,
        table: &str,
        params: &QueryParams,
        now: DateTime<Local>,
    ) -> ApiResult<QueryResult<E>> {
        let compiled = E::compile(params, now)?;
        let expr = ScanExpression::build(table, compiled.filter, E::ATTRIBUTES)?;

        let items = self.store.scan(&expr).await?;
        let scanned = items.len();

        let decoded = items
            .into_iter()
            .map(from_item::<E>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                warn!(table, error = %e, "discarding scan with undecodable item");
                e
            })?;

        let records: Vec<E> = decoded
            .into_iter()
            .filter(|record| compiled.residual.accepts(record))
            .collect();
        let count = records.len();

        debug!(table, filter = ?expr.filter, scanned, count, "scan complete");

        Ok(QueryResult { records, count })
    }

    /// Store a new occurrence under a freshly generated identifier.
    ///
    /// Returns the record as stored.
    pub async fn record_occurrence(
        &self,
        table: &str,
        occurrence: Occurrence,
    ) -> ApiResult<Occurrence> {
        let occurrence = occurrence.with_fresh_id();
        self.put(table, &occurrence).await?;

        info!(
            table,
            occurrence_id = %occurrence.occurrence_id,
            species_id = occurrence.species_id,
            "occurrence recorded"
        );
        Ok(occurrence)
    }

    async fn put<E: Entity>(&self, table: &str, record: &E) -> ApiResult<()> {
        let item = to_item(record)?;
        self.store.put(table, item).await?;
        Ok(())
    }
}
