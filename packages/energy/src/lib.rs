#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic home energy usage estimation.
//!
//! A heuristic model, not a fitted one: a base rate per square foot
//! adjusted by a fixed chain of multipliers and additive appliance loads
//! (see [`annual`]), then spread across the year by a seasonal curve (see
//! [`monthly`]). Everything here is pure and safe to call concurrently.

pub mod annual;
pub mod constants;
pub mod factors;
pub mod monthly;

use chrono::{Datelike as _, Utc};
use home_energy_energy_models::EnergyEstimate;
use home_energy_property_models::PropertyProfile;

pub use annual::{estimate_annual_usage, estimate_annual_usage_at};
pub use factors::parse_occupants;
pub use monthly::estimate_monthly_usage;

/// Computes the annual estimate and its monthly breakdown as of the current
/// calendar year.
#[must_use]
pub fn estimate(profile: &PropertyProfile, occupants: Option<f64>) -> EnergyEstimate {
    estimate_at(profile, occupants, Utc::now().year())
}

/// Computes the annual estimate and its monthly breakdown as of
/// `current_year`.
#[must_use]
pub fn estimate_at(
    profile: &PropertyProfile,
    occupants: Option<f64>,
    current_year: i32,
) -> EnergyEstimate {
    let annual_usage_kwh = estimate_annual_usage_at(profile, occupants, current_year);
    EnergyEstimate {
        annual_usage_kwh,
        monthly_usage: estimate_monthly_usage(annual_usage_kwh),
    }
}
