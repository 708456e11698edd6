//! # Filter Compiler
//!
//! The backend evaluates one predicate per scan. Each query is split into
//! that predicate and a residual checked here after the scan: species
//! selectors go entirely to the backend, occurrence queries filter on species
//! in the backend and on date and accuracy locally.

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde_json::json;

use super::errors::ApiResult;
use super::parser::{OccurrenceQuery, QueryParams, SpeciesQuery, SpeciesSelector};
use crate::model::occurrence::{self, DATE_FORMAT};
use crate::model::species::{COMMON, PLANT_ID, SCIENTIFIC};
use crate::model::{Entity, Occurrence, Species};
use crate::store::FilterExpr;

/// Post-scan predicate applied to decoded records
pub trait ResidualFilter<E>: Send + Sync {
    fn accepts(&self, record: &E) -> bool;
}

/// Residual that keeps every record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<E> ResidualFilter<E> for AcceptAll {
    fn accepts(&self, _record: &E) -> bool {
        true
    }
}

/// Occurrence residual: strictly above the accuracy threshold and strictly
/// inside the date window
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceWindow {
    /// Accuracy fraction, `acc / 100`
    pub min_accuracy: f64,

    /// Exclusive lower bound, `YYYY-MM-DD`
    pub date_from: String,

    /// Exclusive upper bound, `YYYY-MM-DD`
    pub date_to: String,
}

impl ResidualFilter<Occurrence> for OccurrenceWindow {
    fn accepts(&self, record: &Occurrence) -> bool {
        // Fixed-width zero-padded dates order lexically
        record.accuracy > self.min_accuracy
            && record.observed_date.as_str() > self.date_from.as_str()
            && record.observed_date.as_str() < self.date_to.as_str()
    }
}

/// Backend predicate plus residual for one query
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery<R> {
    /// `None` scans the whole table
    pub filter: Option<FilterExpr>,

    pub residual: R,
}

impl SpeciesQuery {
    pub fn compile(&self) -> CompiledQuery<AcceptAll> {
        let filter = self.selector.as_ref().map(|selector| match selector {
            SpeciesSelector::Common(name) => FilterExpr::eq(COMMON, json!(name)),
            SpeciesSelector::Scientific(name) => FilterExpr::eq(SCIENTIFIC, json!(name)),
            SpeciesSelector::Id(id) => FilterExpr::eq(PLANT_ID, json!(id)),
        });

        CompiledQuery {
            filter,
            residual: AcceptAll,
        }
    }
}

impl OccurrenceQuery {
    /// Compile with defaults for missing bounds: from 1970-01-01, to a day
    /// after `now` in local time, accuracy above 0.
    pub fn compile(&self, now: DateTime<Local>) -> CompiledQuery<OccurrenceWindow> {
        let filter = match self.species_id {
            Some(id) => FilterExpr::eq(occurrence::PLANT_ID, json!(id)),
            None => FilterExpr::gt(occurrence::PLANT_ID, json!(-1)),
        };

        // NaiveDate's default is 1970-01-01
        let date_from: NaiveDate = self.date_from.unwrap_or_default();
        let date_to = self
            .date_to
            .unwrap_or_else(|| (now + Duration::hours(24)).date_naive());

        CompiledQuery {
            filter: Some(filter),
            residual: OccurrenceWindow {
                min_accuracy: self.min_accuracy_percent.unwrap_or(0.0) / 100.0,
                date_from: date_from.format(DATE_FORMAT).to_string(),
                date_to: date_to.format(DATE_FORMAT).to_string(),
            },
        }
    }
}

/// An entity that can be queried from raw request parameters
pub trait Queryable: Entity + Sized {
    type Residual: ResidualFilter<Self>;

    /// Compile request parameters into a backend predicate and residual
    fn compile(
        params: &QueryParams,
        now: DateTime<Local>,
    ) -> ApiResult<CompiledQuery<Self::Residual>>;
}

impl Queryable for Species {
    type Residual = AcceptAll;

    fn compile(params: &QueryParams, _now: DateTime<Local>) -> ApiResult<CompiledQuery<AcceptAll>> {
        Ok(SpeciesQuery::parse(params)?.compile())
    }
}

impl Queryable for Occurrence {
    type Residual = OccurrenceWindow;

    fn compile(
        params: &QueryParams,
        now: DateTime<Local>,
    ) -> ApiResult<CompiledQuery<OccurrenceWindow>> {
        Ok(OccurrenceQuery::parse(params).compile(now))
    }
}
