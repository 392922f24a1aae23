//! Energy usage model constants.
//!
//! All tables are immutable and ordered; lookups that fall back to
//! substring matching take the first matching entry.

use home_energy_energy_models::{Appliance, HvacEfficiency, InsulationQuality, Month};

/// Base consumption in kWh per square foot per year.
pub const BASE_CONSUMPTION_RATE: f64 = 10.0;

/// Occupant count used when none (or an invalid one) is given.
pub const DEFAULT_OCCUPANTS: f64 = 3.0;

/// Fractional increase per occupant beyond the first.
pub const OCCUPANCY_ADJUSTMENT_RATE: f64 = 0.2;

/// Fractional reduction when solar is installed.
pub const SOLAR_REDUCTION_RATE: f64 = 0.5;

/// Multiplier for pool pump load.
pub const POOL_PUMP_MULTIPLIER: f64 = 1.15;

/// HVAC systems this many years old or newer are [`HvacEfficiency::Modern`].
pub const MODERN_HVAC_MAX_AGE: i32 = 5;

/// HVAC systems this many years old or newer are [`HvacEfficiency::Standard`].
pub const STANDARD_HVAC_MAX_AGE: i32 = 15;

#[must_use]
pub const fn hvac_efficiency_multiplier(efficiency: HvacEfficiency) -> f64 {
    match efficiency {
        HvacEfficiency::Modern => 0.85,
        HvacEfficiency::Standard => 1.0,
        HvacEfficiency::Older => 1.2,
    }
}

#[must_use]
pub const fn insulation_multiplier(quality: InsulationQuality) -> f64 {
    match quality {
        InsulationQuality::Poor => 1.15,
        InsulationQuality::Average => 1.0,
        InsulationQuality::Good => 0.95,
        InsulationQuality::Excellent => 0.9,
    }
}

/// Construction keywords and the insulation quality they imply, checked
/// in order against the lowercased construction description.
pub const INSULATION_KEYWORDS: &[(&[&str], InsulationQuality)] = &[
    (&["concrete", "brick"], InsulationQuality::Excellent),
    (&["stucco", "steel"], InsulationQuality::Good),
    (&["wood", "siding"], InsulationQuality::Average),
    (&["mobile", "modular"], InsulationQuality::Poor),
];

/// Key of the fallback entry in [`ROOF_TYPE_MULTIPLIERS`].
pub const UNKNOWN_ROOF_TYPE: &str = "unknown";

/// Roof material multipliers.
pub const ROOF_TYPE_MULTIPLIERS: &[(&str, f64)] = &[
    ("tile", 0.95),
    ("clay", 0.95),
    ("metal", 0.9),
    ("shingle", 1.0),
    ("asphalt", 1.0),
    ("wood", 1.05),
    ("slate", 0.92),
    ("flat", 1.08),
    ("tar", 1.1),
    ("gravel", 1.1),
    (UNKNOWN_ROOF_TYPE, 1.0),
    ("other", 1.0),
];

/// Multiplier applied when the roof type matches nothing.
pub const UNKNOWN_ROOF_MULTIPLIER: f64 = 1.0;

/// Additional kWh per year for an appliance.
#[must_use]
pub const fn appliance_annual_kwh(appliance: Appliance) -> f64 {
    match appliance {
        Appliance::Refrigerator => 600.0,
        Appliance::Dishwasher => 300.0,
        Appliance::Washer | Appliance::Microwave => 100.0,
        Appliance::Dryer => 900.0,
        Appliance::Oven => 350.0,
    }
}

/// Share of annual usage falling in each month, in calendar order.
pub const MONTHLY_DISTRIBUTION: [(Month, f64); 12] = [
    (Month::January, 0.075),
    (Month::February, 0.065),
    (Month::March, 0.07),
    (Month::April, 0.075),
    (Month::May, 0.08),
    (Month::June, 0.095),
    (Month::July, 0.11),
    (Month::August, 0.11),
    (Month::September, 0.095),
    (Month::October, 0.08),
    (Month::November, 0.075),
    (Month::December, 0.07),
];
