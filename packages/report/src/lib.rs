#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property report persistence and enrichment.
//!
//! A report is created from the address the user selected, then enriched
//! once with external property data. Storage sits behind the
//! [`store::ReportStore`] trait, with a `DuckDB`-backed implementation for
//! the server and an in-memory one for tests and one-off CLI runs.

pub mod address;
pub mod duckdb_store;
pub mod enrich;
pub mod memory;
pub mod paths;
pub mod store;

pub use duckdb_store::DuckDbReportStore;
pub use enrich::{EnrichmentOutcome, enrich_report};
pub use memory::MemoryReportStore;
pub use store::ReportStore;

use home_energy_report_models::ReportId;
use thiserror::Error;

/// Errors from report storage.
#[derive(Debug, Error)]
pub enum ReportError {
    /// `DuckDB` query error.
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    /// A stored section could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No report exists with the given id.
    #[error("Report not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: ReportId,
    },

    /// A stored value could not be converted back into a report field.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
