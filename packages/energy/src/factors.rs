//! Per-characteristic adjustment factors.
//!
//! Every selector has a defined fallback and never fails.

use home_energy_energy_models::{Appliance, HvacEfficiency, InsulationQuality};

use crate::constants::{
    DEFAULT_OCCUPANTS, INSULATION_KEYWORDS, MODERN_HVAC_MAX_AGE, OCCUPANCY_ADJUSTMENT_RATE,
    ROOF_TYPE_MULTIPLIERS, STANDARD_HVAC_MAX_AGE, UNKNOWN_ROOF_MULTIPLIER, appliance_annual_kwh,
};

/// Coerces an occupant count, defaulting non-finite or non-positive input
/// to [`DEFAULT_OCCUPANTS`].
#[must_use]
pub fn occupant_count(occupants: Option<f64>) -> f64 {
    occupants
        .filter(|n| n.is_finite() && *n > 0.0)
        .unwrap_or(DEFAULT_OCCUPANTS)
}

/// Parses an occupant count from user input (e.g. a form field).
#[must_use]
pub fn parse_occupants(input: &str) -> f64 {
    occupant_count(input.trim().parse::<f64>().ok())
}

/// Multiplier for the household size: 20% more per occupant beyond one.
#[must_use]
pub fn occupancy_multiplier(occupants: Option<f64>) -> f64 {
    let count = occupant_count(occupants).max(1.0);
    (count - 1.0).mul_add(OCCUPANCY_ADJUSTMENT_RATE, 1.0)
}

/// Classifies an HVAC system by age since installation.
///
/// An unknown or zero installation year is [`HvacEfficiency::Standard`],
/// as is one too far from `current_year` to compute an age.
#[must_use]
pub fn hvac_efficiency(hvac_installed: Option<i32>, current_year: i32) -> HvacEfficiency {
    let Some(installed) = hvac_installed.filter(|year| *year != 0) else {
        return HvacEfficiency::Standard;
    };

    let Some(age) = current_year.checked_sub(installed) else {
        return HvacEfficiency::Standard;
    };
    if age <= MODERN_HVAC_MAX_AGE {
        HvacEfficiency::Modern
    } else if age <= STANDARD_HVAC_MAX_AGE {
        HvacEfficiency::Standard
    } else {
        HvacEfficiency::Older
    }
}

/// Infers insulation quality from a construction description.
#[must_use]
pub fn insulation_quality(construction: Option<&str>) -> InsulationQuality {
    let Some(construction) = construction.filter(|c| !c.is_empty()) else {
        return InsulationQuality::Average;
    };

    let construction = construction.to_lowercase();
    INSULATION_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| construction.contains(k)))
        .map_or(InsulationQuality::Average, |(_, quality)| *quality)
}

/// Multiplier for a roof type.
///
/// Tries an exact (lowercased) table match first, then the first table key
/// contained in the roof type, then the unknown multiplier.
#[must_use]
pub fn roof_type_multiplier(roof_type: Option<&str>) -> f64 {
    let Some(roof_type) = roof_type.filter(|r| !r.is_empty()) else {
        return UNKNOWN_ROOF_MULTIPLIER;
    };

    let roof_type = roof_type.to_lowercase();

    if let Some((_, multiplier)) = ROOF_TYPE_MULTIPLIERS.iter().find(|(k, _)| *k == roof_type) {
        return *multiplier;
    }

    ROOF_TYPE_MULTIPLIERS
        .iter()
        .find(|(k, _)| roof_type.contains(k))
        .map_or(UNKNOWN_ROOF_MULTIPLIER, |(_, multiplier)| *multiplier)
}

/// Total additional annual kWh for recognised appliances. Each entry
/// counts, so duplicates add twice; unrecognised names add nothing.
#[must_use]
pub fn appliance_load(appliances: &[String]) -> f64 {
    appliances
        .iter()
        .filter_map(|name| name.parse::<Appliance>().ok())
        .map(appliance_annual_kwh)
        .sum()
}
