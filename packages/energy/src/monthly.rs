//! Seasonal distribution of an annual estimate into monthly figures.
//!
//! Each month is rounded independently, so the twelve values may not sum
//! exactly to the annual figure.

use home_energy_energy_models::{AnnualUsage, MonthlyUsage};

use crate::constants::MONTHLY_DISTRIBUTION;

/// Distributes an annual estimate over the twelve months.
///
/// Returns `None` when the annual estimate is unavailable.
#[must_use]
pub fn estimate_monthly_usage(annual: AnnualUsage) -> Option<Vec<MonthlyUsage>> {
    annual.kwh().map(distribute)
}

/// Splits `annual_kwh` across the months using the fixed seasonal curve.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn distribute(annual_kwh: f64) -> Vec<MonthlyUsage> {
    MONTHLY_DISTRIBUTION
        .iter()
        .map(|(month, weight)| MonthlyUsage {
            month: *month,
            usage: (annual_kwh * weight).round() as i64,
        })
        .collect()
}
