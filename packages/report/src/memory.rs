//! In-memory report store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use home_energy_property_models::PropertyProfile;
use home_energy_report_models::{AddressDetails, MapsData, PropertyReport, ReportId};
use tokio::sync::RwLock;

use crate::ReportError;
use crate::store::{ReportStore, new_report_id};

/// Report store held in process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<BTreeMap<ReportId, PropertyReport>>,
}

impl MemoryReportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn update(
        &self,
        id: &ReportId,
        apply: impl FnOnce(&mut PropertyReport) + Send,
    ) -> Result<(), ReportError> {
        let mut reports = self.reports.write().await;
        let report = reports
            .get_mut(id)
            .ok_or_else(|| ReportError::NotFound { id: id.clone() })?;
        apply(report);
        Ok(())
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn create_report(&self, details: AddressDetails) -> Result<ReportId, ReportError> {
        let id = new_report_id();
        let report = PropertyReport {
            id: id.clone(),
            maps_data: MapsData {
                details,
                created_at: Utc::now(),
            },
            profile: None,
            datafiniti_fetched_at: None,
            datafiniti_error: None,
            updated_at: None,
        };
        self.reports.write().await.insert(id.clone(), report);
        Ok(id)
    }

    async fn get_report(&self, id: &ReportId) -> Result<Option<PropertyReport>, ReportError> {
        Ok(self.reports.read().await.get(id).cloned())
    }

    async fn record_enrichment(
        &self,
        id: &ReportId,
        profile: &PropertyProfile,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let profile = profile.clone();
        self.update(id, move |report| {
            report.profile = Some(profile);
            report.datafiniti_fetched_at = Some(fetched_at);
            report.datafiniti_error = None;
            report.updated_at = Some(Utc::now());
        })
        .await
    }

    async fn record_enrichment_error(
        &self,
        id: &ReportId,
        message: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let message = message.to_string();
        self.update(id, move |report| {
            report.datafiniti_error = Some(message);
            report.datafiniti_fetched_at = Some(fetched_at);
        })
        .await
    }
}
