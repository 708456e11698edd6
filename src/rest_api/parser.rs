//! # Query Parameter Parser
//!
//! Turns raw query-string pairs into typed per-resource queries before any
//! backend call is made.

use chrono::NaiveDate;

use super::errors::{ApiError, ApiResult};

/// Date format accepted by `datefrom` and `dateto`
pub const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Raw query parameters in the order they were supplied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value supplied for `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Which single attribute a species query selects on
#[derive(Debug, Clone, PartialEq)]
pub enum SpeciesSelector {
    Common(String),
    Scientific(String),
    Id(i64),
}

/// Parsed `/species` query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesQuery {
    /// `None` selects every species
    pub selector: Option<SpeciesSelector>,
}

impl SpeciesQuery {
    /// Parse `common`, `scientific` and `id`.
    ///
    /// They are applied in that order and the last one present wins. A
    /// non-integer `id` is an input error.
    pub fn parse(params: &QueryParams) -> ApiResult<Self> {
        let mut selector = None;

        if let Some(common) = params.first("common") {
            selector = Some(SpeciesSelector::Common(common.to_string()));
        }
        if let Some(scientific) = params.first("scientific") {
            selector = Some(SpeciesSelector::Scientific(scientific.to_string()));
        }
        if let Some(id) = params.first("id") {
            let id = id
                .parse::<i64>()
                .map_err(|e| ApiError::InvalidQueryParam(format!("id={:?}: {}", id, e)))?;
            selector = Some(SpeciesSelector::Id(id));
        }

        Ok(Self { selector })
    }
}

/// Parsed `/occurrences` query
///
/// Unparseable values are dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceQuery {
    /// Only set for a non-negative integer `id`
    pub species_id: Option<i64>,

    pub date_from: Option<NaiveDate>,

    pub date_to: Option<NaiveDate>,

    /// `acc` as given, in percent
    pub min_accuracy_percent: Option<f64>,
}

impl OccurrenceQuery {
    /// Parse `id`, `datefrom`, `dateto` and `acc`
    pub fn parse(params: &QueryParams) -> Self {
        Self {
            species_id: params
                .first("id")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|id| *id >= 0),
            date_from: params.first("datefrom").and_then(parse_query_date),
            date_to: params.first("dateto").and_then(parse_query_date),
            min_accuracy_percent: params.first("acc").and_then(|v| v.parse::<f64>().ok()),
        }
    }
}

/// Parse an eight-digit `YYYYMMDD` date
fn parse_query_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, QUERY_DATE_FORMAT).ok()
}
