//! Report storage abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use home_energy_property_models::PropertyProfile;
use home_energy_report_models::{AddressDetails, PropertyReport, ReportId};

use crate::ReportError;

/// Persistent store of property reports.
///
/// A report is written at most twice: once on creation and once when
/// enrichment completes. Recording an enrichment result for an unknown id
/// fails with [`ReportError::NotFound`].
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Creates a report for `details`, stamping the creation time, and
    /// returns its new id.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the report cannot be written.
    async fn create_report(&self, details: AddressDetails) -> Result<ReportId, ReportError>;

    /// Loads a report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the read fails.
    async fn get_report(&self, id: &ReportId) -> Result<Option<PropertyReport>, ReportError>;

    /// Records a successful enrichment.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if the report does not exist, or
    /// another [`ReportError`] if the write fails.
    async fn record_enrichment(
        &self,
        id: &ReportId,
        profile: &PropertyProfile,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError>;

    /// Records a failed enrichment.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if the report does not exist, or
    /// another [`ReportError`] if the write fails.
    async fn record_enrichment_error(
        &self,
        id: &ReportId,
        message: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError>;
}

/// Generates a fresh report id.
#[must_use]
pub fn new_report_id() -> ReportId {
    ReportId::new(uuid::Uuid::new_v4().to_string())
}
