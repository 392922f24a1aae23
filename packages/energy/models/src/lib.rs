#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Energy estimate types.
//!
//! An estimate is either a positive kWh figure or the explicit
//! [`AnnualUsage::Unavailable`] sentinel, which is kept distinct from zero
//! and from `null` so callers can render "N/A" instead of a misleading
//! number.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Estimated annual energy usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnnualUsageRepr", into = "AnnualUsageRepr")]
pub enum AnnualUsage {
    /// Estimated usage in kWh per year. Always finite and positive.
    Kwh(f64),
    /// The estimate cannot be computed for this property.
    Unavailable,
}

impl AnnualUsage {
    /// Returns the kWh figure, if available.
    #[must_use]
    pub const fn kwh(self) -> Option<f64> {
        match self {
            Self::Kwh(kwh) => Some(kwh),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Kwh(_))
    }
}

/// Renders `"12,345 kWh"` or `"N/A"`.
impl fmt::Display for AnnualUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kwh(kwh) => write!(f, "{} kWh", group_thousands(kwh.round())),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Formats a whole number with `,` thousands separators.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Wire form: a number, or the string `"unavailable"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AnnualUsageRepr {
    Kwh(f64),
    Sentinel(UsageSentinel),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum UsageSentinel {
    Unavailable,
}

impl From<AnnualUsageRepr> for AnnualUsage {
    fn from(repr: AnnualUsageRepr) -> Self {
        match repr {
            AnnualUsageRepr::Kwh(kwh) if kwh.is_finite() && kwh > 0.0 => Self::Kwh(kwh),
            AnnualUsageRepr::Kwh(_) | AnnualUsageRepr::Sentinel(UsageSentinel::Unavailable) => {
                Self::Unavailable
            }
        }
    }
}

impl From<AnnualUsage> for AnnualUsageRepr {
    fn from(usage: AnnualUsage) -> Self {
        match usage {
            AnnualUsage::Kwh(kwh) => Self::Kwh(kwh),
            AnnualUsage::Unavailable => Self::Sentinel(UsageSentinel::Unavailable),
        }
    }
}

/// Calendar months, in order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];
}

/// Estimated usage for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    /// Calendar month.
    pub month: Month,
    /// Whole kWh for the month.
    pub usage: i64,
}

/// Annual estimate plus its monthly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyEstimate {
    /// Annual usage or the unavailable sentinel.
    pub annual_usage_kwh: AnnualUsage,
    /// Twelve monthly figures in calendar order; absent when the annual
    /// figure is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_usage: Option<Vec<MonthlyUsage>>,
}

impl EnergyEstimate {
    /// An estimate for a property with no usable data.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            annual_usage_kwh: AnnualUsage::Unavailable,
            monthly_usage: None,
        }
    }
}

/// HVAC efficiency class, by system age.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HvacEfficiency {
    /// Installed within the last five years.
    Modern,
    /// Five to fifteen years old, or unknown.
    Standard,
    /// Older than fifteen years.
    Older,
}

/// Insulation quality inferred from construction materials.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InsulationQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

/// Appliances with a fixed annual load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Appliance {
    Refrigerator,
    Dishwasher,
    Washer,
    Dryer,
    Oven,
    Microwave,
}
