#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property data normalization and lookup for home energy reports.
//!
//! Turns a loosely-structured external property record into a canonical
//! [`PropertyProfile`](home_energy_property_models::PropertyProfile) and
//! resolves which external record belongs to a user-submitted address:
//!
//! 1. [`address`] generates ordered address-variation candidates.
//! 2. [`lookup::find_first_match`] tries each candidate against an
//!    injected [`lookup::PropertyLookup`] until one returns records.
//! 3. [`normalize::normalize`] derives the profile from the first record.
//!
//! The only shipped lookup is the [`datafiniti`] client, configured through
//! the TOML files in `services/` (see [`service_registry`]).

pub mod address;
pub mod datafiniti;
pub mod hvac;
pub mod lookup;
pub mod normalize;
pub mod parsing;
pub mod service_registry;

pub use normalize::{normalize, normalize_at};

use thiserror::Error;

/// Errors from external property lookups.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("Property source returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The lookup service is not usable as configured.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is missing or invalid.
        message: String,
    },
}
