#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property record types.
//!
//! [`RawPropertyRecord`] wraps the untrusted JSON record returned by the
//! external property data source. Every accessor tolerates absent, `null`,
//! or wrongly-shaped fields. [`PropertyProfile`] is the canonical,
//! fully-typed shape derived from it and persisted on a property report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

/// A raw property record as returned by the external lookup source.
///
/// The record is kept as an untyped JSON value so that a single malformed
/// field can never make the whole record unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPropertyRecord(Value);

impl From<Value> for RawPropertyRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl RawPropertyRecord {
    /// Wraps a JSON value as a raw record.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns a top-level field, treating `null` as absent.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns a top-level string field. Empty strings are treated as absent.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns the string elements of a top-level list field.
    ///
    /// A missing field, a non-list value, or non-string elements all
    /// contribute nothing.
    #[must_use]
    pub fn str_list(&self, key: &str) -> Vec<&str> {
        self.field(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the first string element of a top-level list field.
    #[must_use]
    pub fn first_str(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns the first element of a top-level list field if it is an
    /// object (e.g. the most recent `assessedValues` snapshot).
    #[must_use]
    pub fn first_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.field(key)
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(Value::as_object)
    }

    /// Returns the record's key/value-list feature entries.
    ///
    /// Entries that are not objects are skipped. An entry with a missing
    /// or non-list `value` yields an empty value list.
    #[must_use]
    pub fn features(&self) -> Vec<Feature<'_>> {
        self.field("features")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Feature::from_value).collect())
            .unwrap_or_default()
    }
}

/// A single `{ "key": ..., "value": [...] }` feature entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature<'a> {
    /// Feature key (e.g. `"Garage Parking Spaces"`).
    pub key: Option<&'a str>,
    /// String values attached to the feature.
    pub values: Vec<&'a str>,
}

impl<'a> Feature<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let key = obj.get("key").and_then(Value::as_str);
        let values = obj
            .get("value")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        Some(Self { key, values })
    }

    /// Returns `true` if this feature has exactly the given key.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.key == Some(key)
    }

    /// Returns `true` if one of the values is exactly `value`.
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<&'a str> {
        self.values.first().copied()
    }
}

/// Natural hazard categories reported as property features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Hazard {
    /// Flooding.
    Flood,
    /// Earthquakes.
    Earthquake,
    /// Tornadoes.
    Tornado,
}

impl Hazard {
    /// All hazards, in report order.
    pub const ALL: &[Self] = &[Self::Flood, Self::Earthquake, Self::Tornado];

    /// Phrase that identifies this hazard's feature value, e.g.
    /// `"flood risk"`.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Flood => "flood risk",
            Self::Earthquake => "earthquake risk",
            Self::Tornado => "tornado risk",
        }
    }
}

/// Qualitative risk level for a hazard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

/// Canonical property profile derived from a [`RawPropertyRecord`].
///
/// Split into the same three sections that are persisted on a property
/// report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyProfile {
    /// Physical, system, financial, and parking attributes.
    pub property_data: PropertyData,
    /// Neighborhood demographics.
    pub neighborhood_data: NeighborhoodData,
    /// Natural hazard risk levels.
    pub risk_data: RiskData,
}

/// Property-level attributes. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    // Identity / location
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Physical
    pub year_built: Option<i32>,
    /// Estimated year the current HVAC system was installed.
    pub hvac_installed: Option<i32>,
    pub floor_size_sq_ft: Option<f64>,
    pub lot_size_sq_ft: Option<f64>,
    pub num_floors: Option<u32>,
    pub num_bedrooms: Option<u32>,
    pub num_bathrooms: Option<f64>,
    pub construction: Option<String>,
    pub roof_type: Option<String>,

    // Systems
    pub cooling: Option<String>,
    pub heating: Option<String>,
    pub has_air_conditioning: bool,
    pub has_heating: bool,
    pub has_pool: bool,
    pub pool_type: Option<String>,
    pub solar_installed: bool,
    pub has_fireplace: bool,
    pub has_laundry: bool,
    pub appliances: Vec<String>,

    // Financial
    pub assessed_value: Option<f64>,
    pub assessed_land_value: Option<f64>,
    pub assessed_improvement_value: Option<f64>,
    pub estimated_home_value: Option<f64>,
    /// Monthly rent estimate.
    pub estimated_rent: Option<f64>,
    pub hoa_fee: Option<f64>,

    // Parking / zoning
    pub garage_spaces: Option<u32>,
    pub non_garage_spaces: Option<u32>,
    pub total_parking_spaces: Option<u32>,
    pub property_use: Option<String>,
    pub zoning: Option<String>,
}

/// Neighborhood demographics. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodData {
    pub neighborhood: Option<String>,
    pub county: Option<String>,
    pub job_market_white_collar_percent: Option<f64>,
    pub unemployment_rate: Option<f64>,
    pub median_income: Option<i64>,
    pub households_with_children_percent: Option<f64>,
    pub median_homeowner_age: Option<f64>,
}

/// Hazard risk levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskData {
    pub flood_risk: Option<RiskLevel>,
    pub earthquake_risk: Option<RiskLevel>,
    pub tornado_risk: Option<RiskLevel>,
}

impl RiskData {
    /// Returns the risk level recorded for `hazard`.
    #[must_use]
    pub const fn level(&self, hazard: Hazard) -> Option<RiskLevel> {
        match hazard {
            Hazard::Flood => self.flood_risk,
            Hazard::Earthquake => self.earthquake_risk,
            Hazard::Tornado => self.tornado_risk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn features_tolerate_malformed_entries() {
        let record = RawPropertyRecord::new(json!({
            "features": [
                "not an object",
                { "key": "Pool" },
                { "key": "Fireplace", "value": "Yes" },
                { "key": "Laundry", "value": ["In Unit", 3] }
            ]
        }));

        let features = record.features();
        assert_eq!(features.len(), 3);
        assert!(features[0].values.is_empty());
        assert!(features[1].values.is_empty());
        assert_eq!(features[2].values, vec!["In Unit"]);
    }

    #[test]
    fn features_as_non_list_is_empty() {
        let record = RawPropertyRecord::new(json!({ "features": { "key": "Pool" } }));
        assert!(record.features().is_empty());
    }

    #[test]
    fn null_fields_are_absent() {
        let record = RawPropertyRecord::new(json!({ "city": null, "roofing": null }));
        assert!(record.field("city").is_none());
        assert!(record.first_str("roofing").is_none());
        assert!(record.str_list("roofing").is_empty());
    }

    #[test]
    fn non_object_record_has_no_fields() {
        let record = RawPropertyRecord::new(json!([1, 2, 3]));
        assert!(record.field("address").is_none());
        assert!(record.features().is_empty());
    }

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
    }

    #[test]
    fn profile_serializes_with_report_section_names() {
        let value = serde_json::to_value(PropertyProfile::default()).unwrap();
        assert!(value.get("propertyData").is_some());
        assert!(value.get("neighborhoodData").is_some());
        assert!(value["riskData"]["floodRisk"].is_null());
        assert!(value["propertyData"]["floorSizeSqFt"].is_null());
    }
}
