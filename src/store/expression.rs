//! # Scan Expressions
//!
//! The backend accepts one filter predicate and one projection per scan.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};

/// A store-native item: attribute name to attribute value
pub type Item = Map<String, Value>;

/// Filter operators understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Greater than
    Gt,
}

/// A single filter predicate on one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Attribute to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: Value,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Create a greater than filter
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Gt, value)
    }

    /// Check if an item matches this filter. Items lacking the attribute never match.
    pub fn matches(&self, item: &Item) -> bool {
        let Some(field_value) = item.get(&self.field) else {
            return false;
        };

        match self.operator {
            FilterOperator::Eq => {
                field_value == &self.value
                    || compare_values(field_value, &self.value) == Some(Ordering::Equal)
            }
            FilterOperator::Gt => {
                compare_values(field_value, &self.value) == Some(Ordering::Greater)
            }
        }
    }
}

/// Order two values of the same scalar kind. Numbers compare numerically,
/// strings lexically; anything else is unordered.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// A validated scan request
#[derive(Debug, Clone, PartialEq)]
pub struct ScanExpression {
    pub table: String,

    /// `None` scans every item
    pub filter: Option<FilterExpr>,

    /// Attributes returned for each item
    pub projection: Vec<String>,
}

impl ScanExpression {
    /// Build a scan request.
    ///
    /// The projection must be non-empty and the filter may only reference a
    /// projected attribute.
    pub fn build(
        table: impl Into<String>,
        filter: Option<FilterExpr>,
        projection: &[&str],
    ) -> StoreResult<Self> {
        let table = table.into();
        if table.is_empty() {
            return Err(StoreError::Expression("table name is empty".to_string()));
        }
        if projection.is_empty() {
            return Err(StoreError::Expression("projection is empty".to_string()));
        }
        if let Some(filter) = &filter {
            if !projection.contains(&filter.field.as_str()) {
                return Err(StoreError::Expression(format!(
                    "filter attribute {} is not part of the projection",
                    filter.field
                )));
            }
        }

        Ok(Self {
            table,
            filter,
            projection: projection.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Check an item against the filter
    pub fn matches(&self, item: &Item) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(item))
    }

    /// Copy out only the projected attributes of an item
    pub fn project(&self, item: &Item) -> Item {
        item.iter()
            .filter(|(k, _)| self.projection.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::eq("Common", json!("Toyon"));

        assert!(filter.matches(&item(json!({"Common": "Toyon"}))));
        assert!(!filter.matches(&item(json!({"Common": "Manzanita"}))));
        assert!(!filter.matches(&item(json!({"Scientific": "Toyon"}))));
    }

    #[test]
    fn test_eq_filter_numeric() {
        let filter = FilterExpr::eq("PlantID", json!(3));

        assert!(filter.matches(&item(json!({"PlantID": 3}))));
        assert!(filter.matches(&item(json!({"PlantID": 3.0}))));
        assert!(!filter.matches(&item(json!({"PlantID": "3"}))));
    }

    #[test]
    fn test_gt_filter() {
        let filter = FilterExpr::gt("PlantID", json!(-1));

        assert!(filter.matches(&item(json!({"PlantID": 0}))));
        assert!(filter.matches(&item(json!({"PlantID": 12}))));
        assert!(!filter.matches(&item(json!({"PlantID": -1}))));
        assert!(!filter.matches(&item(json!({"Common": "x"}))));
    }

    #[test]
    fn test_build_rejects_empty_projection() {
        let result = ScanExpression::build("Plants", None, &[]);
        assert!(matches!(result, Err(StoreError::Expression(_))));
    }

    #[test]
    fn test_build_rejects_unprojected_filter() {
        let result = ScanExpression::build(
            "Plants",
            Some(FilterExpr::eq("Family", json!("Rosaceae"))),
            &["PlantID", "Common"],
        );
        assert!(matches!(result, Err(StoreError::Expression(_))));
    }

    #[test]
    fn test_project() {
        let expr = ScanExpression::build("Plants", None, &["PlantID", "Common"]).unwrap();
        let projected = expr.project(&item(json!({
            "PlantID": 1,
            "Common": "Toyon",
            "Internal": "hidden"
        })));

        assert_eq!(projected, item(json!({"PlantID": 1, "Common": "Toyon"})));
    }

    #[test]
    fn test_unfiltered_matches_everything() {
        let expr = ScanExpression::build("Plants", None, &["PlantID"]).unwrap();
        assert!(expr.matches(&item(json!({}))));
    }
}
