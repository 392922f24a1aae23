//! Address extraction from map place results.

use home_energy_report_models::{AddressDetails, PlaceResult};

/// Builds the report address from a place result.
///
/// Each component is classified by its first type; a later component of
/// the same type replaces an earlier one. The street line is
/// `"{street_number} {route}"` with `" #{subpremise}"` appended when the
/// place has a unit. Route and state use short names (`"Main St"`,
/// `"TX"`), everything else long names. Missing components become empty
/// strings.
#[must_use]
pub fn extract_address_details(place: &PlaceResult) -> AddressDetails {
    let mut street_number = "";
    let mut route = "";
    let mut unit = "";
    let mut city = "";
    let mut state = "";
    let mut zip = "";

    for component in &place.address_components {
        let Some(kind) = component.types.first() else {
            continue;
        };
        match kind.as_str() {
            "street_number" => street_number = &component.long_name,
            "route" => route = &component.short_name,
            "subpremise" => unit = &component.long_name,
            "locality" => city = &component.long_name,
            "administrative_area_level_1" => state = &component.short_name,
            "postal_code" => zip = &component.long_name,
            _ => {}
        }
    }

    let address = if unit.is_empty() {
        format!("{street_number} {route}")
    } else {
        format!("{street_number} {route} #{unit}")
    };

    let location = place.geometry.map(|g| g.location);

    AddressDetails {
        address: address.trim().to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
        formatted_address: place.formatted_address.clone(),
        latitude: location.map(|l| l.lat),
        longitude: location.map(|l| l.lng),
        place_id: place.place_id.clone(),
        url: place.url.clone(),
    }
}
