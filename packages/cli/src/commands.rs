//! Command implementations shared by the subcommands and interactive mode.
//!
//! Each command renders its output to a `String` so the formatting can be
//! tested without a terminal.

use std::path::Path;

use home_energy_energy::estimate;
use home_energy_energy_models::EnergyEstimate;
use home_energy_property::LookupError;
use home_energy_property::address::generate_address_variations;
use home_energy_property::lookup::{LookupOutcome, search_address};
use home_energy_property::service_registry;
use home_energy_property::normalize;
use home_energy_property_models::{PropertyProfile, RawPropertyRecord};
use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The record file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The record or output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The property lookup service failed to start.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Reads a raw property record from a JSON file.
///
/// # Errors
///
/// Returns [`CliError`] if the file cannot be read or is not JSON.
pub fn read_record(path: &Path) -> Result<RawPropertyRecord, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_record(&contents)
}

/// Parses a raw property record from JSON text.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the text is not valid JSON.
pub fn parse_record(json: &str) -> Result<RawPropertyRecord, CliError> {
    Ok(serde_json::from_str(json)?)
}

/// Renders the normalized profile of `record` as pretty JSON.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn render_profile(record: &RawPropertyRecord) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&normalize(record))?)
}

/// Renders the energy estimate for `profile` as a text table.
#[must_use]
pub fn render_estimate(profile: &PropertyProfile, occupants: f64) -> String {
    format_estimate(&estimate(profile, Some(occupants)), occupants)
}

fn format_estimate(estimate: &EnergyEstimate, occupants: f64) -> String {
    let mut out = format!(
        "Occupants:    {occupants}\nAnnual usage: {}\n",
        estimate.annual_usage_kwh
    );

    if let Some(months) = &estimate.monthly_usage {
        out.push_str(&format!("\n{:<12} {:>8}\n", "MONTH", "KWH"));
        out.extend(
            months
                .iter()
                .map(|month| format!("{:<12} {:>8}\n", month.month.to_string(), month.usage)),
        );
    }

    out
}

/// Renders the address variations tried for `address`, one per line.
#[must_use]
pub fn render_variations(address: &str) -> String {
    generate_address_variations(address)
        .iter()
        .enumerate()
        .map(|(i, variation)| format!("{}. {variation}\n", i + 1))
        .collect()
}

/// Searches the configured property source and renders the match.
///
/// Returns `None` when no address variation matched.
///
/// # Errors
///
/// Returns [`CliError`] if no lookup service is configured or the output
/// cannot be serialized.
pub async fn lookup(
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    occupants: f64,
) -> Result<Option<String>, CliError> {
    let lookup = service_registry::default_lookup()?;

    match search_address(lookup.as_ref(), address, city, state, zip).await {
        LookupOutcome::Found(found) => {
            let profile = normalize(&found.record);
            Ok(Some(format!(
                "Matched '{}' ({} record(s))\n\n{}\n\n{}",
                found.address_variation,
                found.total_records,
                serde_json::to_string_pretty(&profile)?,
                render_estimate(&profile, occupants)
            )))
        }
        LookupOutcome::NotFound { attempted } => {
            log::warn!("No property data found after {attempted} address variations");
            Ok(None)
        }
    }
}
