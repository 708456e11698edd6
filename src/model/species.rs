//! Plant species records.

use serde::{Deserialize, Serialize};

use super::Entity;

/// Attribute holding the species identifier
pub const PLANT_ID: &str = "PlantID";

/// Attribute holding the common name
pub const COMMON: &str = "Common";

/// Attribute holding the scientific name
pub const SCIENTIFIC: &str = "Scientific";

/// A plant species. Created by the seed process, read-only to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    #[serde(rename = "PlantID")]
    pub id: i64,

    #[serde(rename = "Common")]
    pub common_name: String,

    #[serde(rename = "Scientific")]
    pub scientific_name: String,
}

impl Species {
    pub fn new(id: i64, common_name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        Self {
            id,
            common_name: common_name.into(),
            scientific_name: scientific_name.into(),
        }
    }
}

impl Entity for Species {
    const ATTRIBUTES: &'static [&'static str] = &[PLANT_ID, COMMON, SCIENTIFIC];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let species = Species::new(3, "Coast Live Oak", "Quercus agrifolia");
        let value = serde_json::to_value(&species).unwrap();

        assert_eq!(
            value,
            json!({"PlantID": 3, "Common": "Coast Live Oak", "Scientific": "Quercus agrifolia"})
        );
    }

    #[test]
    fn test_attributes_cover_every_field() {
        let species = Species::new(1, "a", "b");
        let value = serde_json::to_value(&species).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), Species::ATTRIBUTES.len());
        for attr in Species::ATTRIBUTES {
            assert!(obj.contains_key(*attr), "missing {}", attr);
        }
    }
}
