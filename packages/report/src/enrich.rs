//! Report enrichment: look up the property behind a report's address and
//! persist its normalized profile, or the reason none was found.

use chrono::Utc;
use home_energy_property::lookup::{LookupOutcome, PropertyLookup, search_address};
use home_energy_property::normalize;
use home_energy_property_models::PropertyProfile;
use home_energy_report_models::{EnrichmentRequest, ReportId};

use crate::ReportError;
use crate::store::ReportStore;

/// Error recorded when a request lacks a required parameter.
pub const MISSING_PARAMETERS_ERROR: &str = "Missing required parameters";

/// Error recorded when no address variation matches a record.
pub const NOT_FOUND_ERROR: &str = "No property data found for any address variation";

/// Result of an enrichment attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    /// A record was found, normalized, and stored on the report.
    Enriched {
        /// Report that was enriched.
        report_id: ReportId,
        /// The stored profile.
        profile: PropertyProfile,
        /// Address variation that matched.
        address_variation: String,
    },
    /// The request was missing parameters; nothing was looked up.
    InvalidRequest {
        /// Names of the missing parameters.
        missing: Vec<&'static str>,
    },
    /// No address variation produced a record.
    NotFound {
        /// Report the error was recorded on.
        report_id: ReportId,
    },
}

/// Enriches a report.
///
/// An invalid request is reported without a lookup; its error is recorded
/// on the report when the request at least names one that exists. A
/// failed lookup records [`NOT_FOUND_ERROR`]. Lookup transport failures
/// never surface here; they count as misses for their variation.
///
/// # Errors
///
/// Returns [`ReportError`] if the store fails, including
/// [`ReportError::NotFound`] when a valid request names an unknown report.
pub async fn enrich_report(
    store: &dyn ReportStore,
    lookup: &dyn PropertyLookup,
    request: &EnrichmentRequest,
) -> Result<EnrichmentOutcome, ReportError> {
    let Some(valid) = request.validate() else {
        let missing = request.missing_fields();
        log::warn!("Rejecting enrichment request, missing: {missing:?}");

        if let Some(id) = request
            .property_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
        {
            let id = ReportId::new(id);
            match store
                .record_enrichment_error(&id, MISSING_PARAMETERS_ERROR, Utc::now())
                .await
            {
                Ok(()) | Err(ReportError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        return Ok(EnrichmentOutcome::InvalidRequest { missing });
    };

    log::info!(
        "Enriching report {} for {}, {}, {} {}",
        valid.property_id,
        valid.address,
        valid.city,
        valid.state,
        valid.zip
    );

    match search_address(lookup, valid.address, valid.city, valid.state, valid.zip).await {
        LookupOutcome::Found(found) => {
            let profile = normalize(&found.record);
            store
                .record_enrichment(&valid.property_id, &profile, Utc::now())
                .await?;
            log::info!(
                "Stored property data for report {} ({} records for '{}')",
                valid.property_id,
                found.total_records,
                found.address_variation
            );
            Ok(EnrichmentOutcome::Enriched {
                report_id: valid.property_id,
                profile,
                address_variation: found.address_variation,
            })
        }
        LookupOutcome::NotFound { attempted } => {
            log::warn!(
                "No property data for report {} after {attempted} variations",
                valid.property_id
            );
            store
                .record_enrichment_error(&valid.property_id, NOT_FOUND_ERROR, Utc::now())
                .await?;
            Ok(EnrichmentOutcome::NotFound {
                report_id: valid.property_id,
            })
        }
    }
}
