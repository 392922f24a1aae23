//! Annual usage estimation.
//!
//! Starting from floor area times the base consumption rate, the estimate
//! applies occupancy, solar, pool, HVAC, insulation, and roof multipliers
//! in that order, then adds fixed appliance loads. The additive step must
//! stay last: it does not commute with the multipliers.

use chrono::{Datelike as _, Utc};
use home_energy_energy_models::AnnualUsage;
use home_energy_property_models::PropertyProfile;

use crate::constants::{
    BASE_CONSUMPTION_RATE, POOL_PUMP_MULTIPLIER, SOLAR_REDUCTION_RATE,
    hvac_efficiency_multiplier, insulation_multiplier,
};
use crate::factors::{
    appliance_load, hvac_efficiency, insulation_quality, occupancy_multiplier,
    roof_type_multiplier,
};

/// Estimates annual usage as of the current calendar year.
#[must_use]
pub fn estimate_annual_usage(profile: &PropertyProfile, occupants: Option<f64>) -> AnnualUsage {
    estimate_annual_usage_at(profile, occupants, Utc::now().year())
}

/// Estimates annual usage, aging the HVAC system against `current_year`.
///
/// Returns [`AnnualUsage::Unavailable`] when the floor size is unknown or
/// the result is not a finite positive number.
#[must_use]
pub fn estimate_annual_usage_at(
    profile: &PropertyProfile,
    occupants: Option<f64>,
    current_year: i32,
) -> AnnualUsage {
    let data = &profile.property_data;

    let Some(floor_size) = data.floor_size_sq_ft else {
        return AnnualUsage::Unavailable;
    };

    let mut usage = floor_size * BASE_CONSUMPTION_RATE;

    usage *= occupancy_multiplier(occupants);

    if data.solar_installed {
        usage *= 1.0 - SOLAR_REDUCTION_RATE;
    }

    if data.has_pool {
        usage *= POOL_PUMP_MULTIPLIER;
    }

    let efficiency = hvac_efficiency(data.hvac_installed, current_year);
    usage *= hvac_efficiency_multiplier(efficiency);

    let insulation = insulation_quality(data.construction.as_deref());
    usage *= insulation_multiplier(insulation);

    usage *= roof_type_multiplier(data.roof_type.as_deref());

    usage += appliance_load(&data.appliances);

    log::debug!(
        "Estimated {usage:.1} kWh/yr (floor={floor_size}, hvac={efficiency}, insulation={insulation})"
    );

    if usage.is_finite() && usage > 0.0 {
        AnnualUsage::Kwh(usage)
    } else {
        AnnualUsage::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use home_energy_property_models::PropertyData;

    const YEAR: i32 = 2024;

    fn profile(data: PropertyData) -> PropertyProfile {
        PropertyProfile {
            property_data: data,
            ..PropertyProfile::default()
        }
    }

    fn kwh(usage: AnnualUsage) -> f64 {
        usage.kwh().expect("estimate should be available")
    }

    #[test]
    fn missing_floor_size_is_unavailable() {
        let usage = estimate_annual_usage_at(&PropertyProfile::default(), Some(3.0), YEAR);
        assert_eq!(usage, AnnualUsage::Unavailable);
    }

    #[test]
    fn base_case_single_occupant() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(1000.0),
            ..PropertyData::default()
        });
        assert!((kwh(estimate_annual_usage_at(&p, Some(1.0), YEAR)) - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn default_occupants_apply_for_invalid_input() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(1000.0),
            ..PropertyData::default()
        });
        let expected = kwh(estimate_annual_usage_at(&p, Some(3.0), YEAR));
        for occupants in [None, Some(0.0), Some(-1.0), Some(f64::NAN)] {
            let usage = kwh(estimate_annual_usage_at(&p, occupants, YEAR));
            assert!((usage - expected).abs() < 1e-9);
        }
        assert!((expected - 14_000.0).abs() < 1e-6);
    }

    #[test]
    fn applies_every_factor_then_appliances() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(2000.0),
            solar_installed: true,
            has_pool: true,
            hvac_installed: Some(2000),
            construction: Some("Brick".to_string()),
            roof_type: Some("Metal".to_string()),
            appliances: vec!["Refrigerator".to_string(), "Dryer".to_string()],
            ..PropertyData::default()
        });

        let multiplied = 2000.0 * 10.0 * 1.4 * 0.5 * 1.15 * 1.2 * 0.9 * 0.9;
        let expected = multiplied + 600.0 + 900.0;

        let usage = kwh(estimate_annual_usage_at(&p, Some(3.0), YEAR));
        assert!((usage - expected).abs() < 1e-6, "{usage} != {expected}");

        let appliances_first = (2000.0 * 10.0 + 1500.0) * 1.4 * 0.5 * 1.15 * 1.2 * 0.9 * 0.9;
        assert!((usage - appliances_first).abs() > 1.0);
    }

    #[test]
    fn modern_hvac_reduces_usage() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(1000.0),
            hvac_installed: Some(2022),
            ..PropertyData::default()
        });
        assert!((kwh(estimate_annual_usage_at(&p, Some(1.0), YEAR)) - 8_500.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_roof_uses_neutral_multiplier() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(1000.0),
            roof_type: Some("asbestos".to_string()),
            ..PropertyData::default()
        });
        assert!((kwh(estimate_annual_usage_at(&p, Some(1.0), YEAR)) - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_result_is_unavailable() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(f64::INFINITY),
            ..PropertyData::default()
        });
        assert_eq!(
            estimate_annual_usage_at(&p, Some(2.0), YEAR),
            AnnualUsage::Unavailable
        );
    }

    #[test]
    fn negative_floor_size_is_unavailable() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(-500.0),
            ..PropertyData::default()
        });
        assert_eq!(
            estimate_annual_usage_at(&p, Some(2.0), YEAR),
            AnnualUsage::Unavailable
        );
    }

    #[test]
    fn estimation_is_deterministic() {
        let p = profile(PropertyData {
            floor_size_sq_ft: Some(1735.0),
            has_pool: true,
            hvac_installed: Some(2012),
            construction: Some("Stucco".to_string()),
            roof_type: Some("Clay Tile".to_string()),
            appliances: vec!["Oven".to_string()],
            ..PropertyData::default()
        });
        let first = estimate_annual_usage_at(&p, Some(4.0), YEAR);
        let second = estimate_annual_usage_at(&p, Some(4.0), YEAR);
        assert_eq!(first, second);
    }
}
