#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the home energy report server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the stored report types to allow independent evolution of the API
//! contract.

use home_energy_energy_models::EnergyEstimate;
use home_energy_report_models::{EnrichmentStatus, PropertyReport, ReportId};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Response to `POST /api/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCreatedReport {
    /// Id of the new report.
    pub id: ReportId,
}

/// Query parameters for `GET /api/reports/{id}`.
///
/// `occupants` is kept as text so a blank or non-numeric form value falls
/// back to the default household size instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQueryParams {
    /// Number of occupants.
    pub occupants: Option<String>,
}

/// A report with its energy estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReport {
    /// The stored report.
    #[serde(flatten)]
    pub report: PropertyReport,
    /// Enrichment lifecycle state.
    pub status: EnrichmentStatus,
    /// Occupant count the estimate was computed for.
    pub occupants: f64,
    /// Annual and monthly usage estimate.
    pub energy_estimate: EnergyEstimate,
    /// Annual usage for display (`"12,345 kWh"` or `"N/A"`).
    pub annual_usage_display: String,
}

/// Successful `POST /api/property-details` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPropertyDetails {
    /// Human-readable result.
    pub message: String,
    /// The enriched report.
    pub property_id: ReportId,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
    /// Underlying cause, when there is one worth exposing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
