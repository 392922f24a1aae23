#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property report record types.
//!
//! A report is created once from the address the user picked on the map
//! and later updated once, when enrichment completes, with either a full
//! [`PropertyProfile`] or an error annotation.

use std::fmt;

use chrono::{DateTime, Utc};
use home_energy_property_models::PropertyProfile;
use serde::{Deserialize, Serialize};

/// Opaque report identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address selected by the user, as extracted from a map place result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDetails {
    /// Street line, including a `#unit` suffix when present.
    pub address: String,
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Address details stamped with the report creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapsData {
    #[serde(flatten)]
    pub details: AddressDetails,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// One component of a map place result (e.g. the `route`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    pub location: LatLng,
}

/// A place result from the address autocomplete widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A stored property report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReport {
    pub id: ReportId,
    pub maps_data: MapsData,
    /// Enriched profile, once the lookup has succeeded.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PropertyProfile>,
    /// When enrichment last completed, successfully or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datafiniti_fetched_at: Option<DateTime<Utc>>,
    /// Why enrichment failed, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datafiniti_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Where a report is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    /// Created; enrichment has not completed.
    Pending,
    /// Profile data is available.
    Enriched,
    /// Enrichment finished with an error.
    Failed,
}

impl PropertyReport {
    #[must_use]
    pub const fn enrichment_status(&self) -> EnrichmentStatus {
        if self.profile.is_some() {
            EnrichmentStatus::Enriched
        } else if self.datafiniti_error.is_some() {
            EnrichmentStatus::Failed
        } else {
            EnrichmentStatus::Pending
        }
    }
}

/// Request to enrich a report with external property data.
///
/// Fields are optional on the wire so that a missing parameter can be
/// reported (and recorded on the report) rather than rejected by the
/// deserializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    pub property_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// An [`EnrichmentRequest`] with every parameter present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEnrichmentRequest<'a> {
    pub property_id: ReportId,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
}

impl EnrichmentRequest {
    /// Names of the parameters that are missing or blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("propertyId", &self.property_id),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    /// Returns the request's parameters if none are missing.
    #[must_use]
    pub fn validate(&self) -> Option<ValidEnrichmentRequest<'_>> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.trim().is_empty())
        }

        Some(ValidEnrichmentRequest {
            property_id: ReportId::new(present(self.property_id.as_deref())?),
            address: present(self.address.as_deref())?,
            city: present(self.city.as_deref())?,
            state: present(self.state.as_deref())?,
            zip: present(self.zip.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn maps_data() -> MapsData {
        MapsData {
            details: AddressDetails {
                address: "123 Main St".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip: "78701".to_string(),
                ..AddressDetails::default()
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pending_report_serializes_without_profile() {
        let report = PropertyReport {
            id: ReportId::new("abc"),
            maps_data: maps_data(),
            profile: None,
            datafiniti_fetched_at: None,
            datafiniti_error: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mapsData"]["address"], "123 Main St");
        assert!(json["mapsData"].get("createdAt").is_some());
        assert!(json.get("propertyData").is_none());
        assert_eq!(report.enrichment_status(), EnrichmentStatus::Pending);
    }

    #[test]
    fn enriched_report_flattens_profile_sections() {
        let report = PropertyReport {
            id: ReportId::new("abc"),
            maps_data: maps_data(),
            profile: Some(PropertyProfile::default()),
            datafiniti_fetched_at: None,
            datafiniti_error: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("propertyData").is_some());
        assert!(json.get("riskData").is_some());
        assert_eq!(report.enrichment_status(), EnrichmentStatus::Enriched);
    }

    #[test]
    fn reports_missing_fields() {
        let request = EnrichmentRequest {
            property_id: Some("abc".to_string()),
            address: Some("  ".to_string()),
            city: Some("Austin".to_string()),
            state: None,
            zip: Some("78701".to_string()),
        };
        assert_eq!(request.missing_fields(), vec!["address", "state"]);
        assert!(request.validate().is_none());
    }

    #[test]
    fn validates_complete_request() {
        let request: EnrichmentRequest = serde_json::from_value(serde_json::json!({
            "propertyId": "abc",
            "address": "123 Main Street",
            "city": "Austin",
            "state": "TX",
            "zip": "78701"
        }))
        .unwrap();
        let valid = request.validate().unwrap();
        assert_eq!(valid.property_id.as_str(), "abc");
        assert_eq!(valid.zip, "78701");
        assert!(request.missing_fields().is_empty());
    }
}
