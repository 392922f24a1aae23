//! Derives a [`PropertyProfile`] from a [`RawPropertyRecord`].
//!
//! Each profile field has its own extractor so that one missing or
//! malformed source field never affects another. Extractors return
//! `None`/`false`/empty on bad input and never panic.

use chrono::{Datelike as _, Utc};
use home_energy_property_models::{
    Feature, Hazard, NeighborhoodData, PropertyData, PropertyProfile, RawPropertyRecord,
    RiskData, RiskLevel,
};
use regex::Regex;
use std::sync::LazyLock;

use crate::hvac::{cooling_system, heating_system, hvac_installation_year};
use crate::parsing::{known_count, known_f64, parse_f64, parse_i64, value_f64, value_i64};

/// First risk level word in a hazard feature value.
static RISK_LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)low|medium|high").expect("valid regex"));

const CONSTRUCTION_PREFIX: &str = "Construction:";

/// Normalizes a raw record using the current calendar year for the HVAC
/// installation estimate.
#[must_use]
pub fn normalize(raw: &RawPropertyRecord) -> PropertyProfile {
    normalize_at(raw, Utc::now().year())
}

/// Normalizes a raw record as of `current_year`.
#[must_use]
pub fn normalize_at(raw: &RawPropertyRecord, current_year: i32) -> PropertyProfile {
    let features = raw.features();

    PropertyProfile {
        property_data: property_data(raw, &features, current_year),
        neighborhood_data: neighborhood_data(raw, &features),
        risk_data: risk_data(&features),
    }
}

fn property_data(
    raw: &RawPropertyRecord,
    features: &[Feature<'_>],
    current_year: i32,
) -> PropertyData {
    let hvac_types = raw.str_list("hvacTypes");
    let exterior_features = raw.str_list("exteriorFeatures");
    let cooling = cooling_system(&hvac_types).map(String::from);
    let heating = heating_system(&hvac_types).map(String::from);
    let year_built = year_built(raw);
    let assessed = raw.first_object("assessedValues");
    let assessed_amount =
        |key: &str| known_f64(assessed.and_then(|a| a.get(key)).and_then(value_f64));

    PropertyData {
        address: text_field(raw, "address"),
        city: text_field(raw, "city"),
        state: text_field(raw, "province"),
        postal_code: text_field(raw, "postalCode"),
        latitude: float_field(raw, "latitude"),
        longitude: float_field(raw, "longitude"),
        year_built,
        hvac_installed: year_built.and_then(|year| hvac_installation_year(year, current_year)),
        floor_size_sq_ft: float_field(raw, "floorSizeValue"),
        lot_size_sq_ft: float_field(raw, "lotSizeValue"),
        num_floors: count_field(raw, "numFloor"),
        num_bedrooms: count_field(raw, "numBedroom"),
        num_bathrooms: float_field(raw, "numBathroom"),
        construction: construction(&exterior_features),
        roof_type: raw.first_str("roofing").map(String::from),
        has_air_conditioning: cooling.is_some(),
        has_heating: heating.is_some(),
        cooling,
        heating,
        has_pool: has_pool(features, &exterior_features),
        pool_type: pool_type(features),
        solar_installed: solar_installed(features),
        has_fireplace: has_fireplace(features),
        has_laundry: has_laundry(features),
        appliances: raw.str_list("appliances").into_iter().map(String::from).collect(),
        assessed_value: assessed_amount("totalAmount"),
        assessed_land_value: assessed_amount("landAmount"),
        assessed_improvement_value: assessed_amount("improvementsAmount"),
        estimated_home_value: float_field(raw, "mostRecentEstimatedPriceAmount"),
        estimated_rent: feature_f64(features, "Redfin Rental Estimate"),
        hoa_fee: known_f64(
            raw.first_object("fees")
                .and_then(|fee| fee.get("amountMax"))
                .and_then(value_f64),
        ),
        garage_spaces: known_count(
            feature_value(features, "Garage Parking Spaces").and_then(parse_i64),
        ),
        non_garage_spaces: known_count(
            feature_value(features, "Non-Garage Parking Spaces").and_then(parse_i64),
        ),
        total_parking_spaces: count_field(raw, "numParkingSpaces"),
        property_use: text_field(raw, "propertyType"),
        zoning: text_field(raw, "zoning"),
    }
}

fn neighborhood_data(raw: &RawPropertyRecord, features: &[Feature<'_>]) -> NeighborhoodData {
    NeighborhoodData {
        neighborhood: raw.first_str("neighborhoods").map(String::from),
        county: text_field(raw, "county"),
        job_market_white_collar_percent: feature_f64(features, "Graduate Degree Percentile"),
        unemployment_rate: feature_f64(features, "Unemployment Rate"),
        median_income: feature_value(features, "Median Family Income")
            .and_then(parse_i64)
            .filter(|v| *v != 0),
        households_with_children_percent: feature_f64(features, "Households with Children"),
        median_homeowner_age: feature_f64(features, "Median Homeowner Age"),
    }
}

fn risk_data(features: &[Feature<'_>]) -> RiskData {
    RiskData {
        flood_risk: risk_level(features, Hazard::Flood),
        earthquake_risk: risk_level(features, Hazard::Earthquake),
        tornado_risk: risk_level(features, Hazard::Tornado),
    }
}

/// Returns the first value of the first feature keyed exactly `key`.
#[must_use]
pub fn feature_value<'a>(features: &[Feature<'a>], key: &str) -> Option<&'a str> {
    features
        .iter()
        .find(|f| f.has_key(key))
        .and_then(Feature::first_value)
}

fn feature_f64(features: &[Feature<'_>], key: &str) -> Option<f64> {
    known_f64(feature_value(features, key).and_then(parse_f64))
}

fn text_field(raw: &RawPropertyRecord, key: &str) -> Option<String> {
    raw.str_field(key).map(String::from)
}

fn float_field(raw: &RawPropertyRecord, key: &str) -> Option<f64> {
    known_f64(raw.field(key).and_then(value_f64))
}

fn count_field(raw: &RawPropertyRecord, key: &str) -> Option<u32> {
    known_count(raw.field(key).and_then(value_i64))
}

/// Year the building was constructed.
#[must_use]
pub fn year_built(raw: &RawPropertyRecord) -> Option<i32> {
    raw.field("yearBuilt")
        .and_then(value_i64)
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| *year != 0)
}

/// Construction material from the first exterior feature containing
/// `"Construction:"`, with that prefix removed.
#[must_use]
pub fn construction(exterior_features: &[&str]) -> Option<String> {
    exterior_features
        .iter()
        .find(|f| f.contains(CONSTRUCTION_PREFIX))
        .map(|f| f.replacen(CONSTRUCTION_PREFIX, "", 1).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Whether the property has a pool.
///
/// True for a `"Pool"` feature containing `"Yes"`, a `"Pool Information"`
/// feature with at least one value, or any exterior feature mentioning a
/// pool (case-insensitive).
#[must_use]
pub fn has_pool(features: &[Feature<'_>], exterior_features: &[&str]) -> bool {
    features.iter().any(|f| {
        (f.has_key("Pool") && f.has_value("Yes"))
            || (f.has_key("Pool Information") && !f.values.is_empty())
    }) || exterior_features
        .iter()
        .any(|f| f.to_lowercase().contains("pool"))
}

/// Comma-joined values of the first `"Pool Information"` feature.
#[must_use]
pub fn pool_type(features: &[Feature<'_>]) -> Option<String> {
    features
        .iter()
        .find(|f| f.has_key("Pool Information"))
        .map(|f| f.values.join(", "))
        .filter(|s| !s.is_empty())
}

/// Whether any feature lists `"Solar"` as one of its values.
#[must_use]
pub fn solar_installed(features: &[Feature<'_>]) -> bool {
    features.iter().any(|f| f.has_value("Solar"))
}

#[must_use]
pub fn has_fireplace(features: &[Feature<'_>]) -> bool {
    features
        .iter()
        .any(|f| f.has_key("Fireplace") && f.has_value("Yes"))
}

/// A `"Laundry"` feature that does not say `"None"`.
#[must_use]
pub fn has_laundry(features: &[Feature<'_>]) -> bool {
    features
        .iter()
        .any(|f| f.has_key("Laundry") && !f.has_value("None"))
}

/// Risk level for `hazard`.
///
/// Finds the first feature value containing the hazard phrase (e.g.
/// `"flood risk"`, case-sensitive) and takes the first `low`/`medium`/`high`
/// word in it, case-insensitively.
#[must_use]
pub fn risk_level(features: &[Feature<'_>], hazard: Hazard) -> Option<RiskLevel> {
    let phrase = hazard.phrase();
    let value = features
        .iter()
        .find_map(|f| f.values.iter().copied().find(|v| v.contains(phrase)))?;

    RISK_LEVEL_RE
        .find(value)
        .and_then(|m| m.as_str().to_lowercase().parse().ok())
}
