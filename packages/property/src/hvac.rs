//! HVAC system classification and installation-year estimation.

/// Average service life of an HVAC system, in years.
pub const HVAC_LIFESPAN_YEARS: i32 = 25;

/// Estimates the year the current HVAC system was installed.
///
/// A building younger than one HVAC lifespan is assumed to still have its
/// original system. Older buildings are assumed to have replaced the
/// system at the end of every completed lifespan, so the current system
/// dates from the most recent completed cycle.
///
/// Returns `None` when the building age does not fit in an `i32`.
#[must_use]
pub const fn hvac_installation_year(year_built: i32, current_year: i32) -> Option<i32> {
    let Some(building_age) = current_year.checked_sub(year_built) else {
        return None;
    };

    if building_age <= HVAC_LIFESPAN_YEARS {
        return Some(year_built);
    }

    let complete_cycles = building_age / HVAC_LIFESPAN_YEARS;
    year_built.checked_add(complete_cycles * HVAC_LIFESPAN_YEARS)
}

/// First HVAC type mentioning `"Central"` (case-sensitive).
#[must_use]
pub fn cooling_system<'a>(hvac_types: &[&'a str]) -> Option<&'a str> {
    hvac_types.iter().copied().find(|t| t.contains("Central"))
}

/// First HVAC type mentioning `"Forced Air"` (case-sensitive).
#[must_use]
pub fn heating_system<'a>(hvac_types: &[&'a str]) -> Option<&'a str> {
    hvac_types.iter().copied().find(|t| t.contains("Forced Air"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn young_building_keeps_original_system() {
        assert_eq!(hvac_installation_year(2010, 2024), Some(2010));
    }

    #[test]
    fn exactly_one_lifespan_keeps_original_system() {
        assert_eq!(hvac_installation_year(1999, 2024), Some(1999));
    }

    #[test]
    fn old_building_uses_last_completed_cycle() {
        assert_eq!(hvac_installation_year(1970, 2024), Some(2020));
        assert_eq!(hvac_installation_year(1998, 2024), Some(2023));
    }

    #[test]
    fn future_year_built_is_returned_as_is() {
        assert_eq!(hvac_installation_year(2030, 2024), Some(2030));
    }

    #[test]
    fn out_of_range_age_has_no_estimate() {
        assert_eq!(hvac_installation_year(-2_147_483_000, 2024), None);
        assert_eq!(hvac_installation_year(i32::MIN, i32::MAX), None);
    }

    #[test]
    fn very_old_building_still_estimates() {
        assert_eq!(hvac_installation_year(-1_000_000, 2024), Some(2000));
    }

    #[test]
    fn classifies_cooling_and_heating() {
        let types = ["Forced Air", "Central A/C", "Central Heat"];
        assert_eq!(cooling_system(&types), Some("Central A/C"));
        assert_eq!(heating_system(&types), Some("Forced Air"));
    }

    #[test]
    fn classification_is_case_sensitive() {
        let types = ["central air", "forced air"];
        assert_eq!(cooling_system(&types), None);
        assert_eq!(heating_system(&types), None);
    }
}
