//! First-success property search over address variations.
//!
//! The transport is injected through [`PropertyLookup`] so the retry
//! policy can run against fakes in tests. Variations are tried one at a
//! time in order. A transport or status failure is logged and counted as
//! a miss; only exhausting every variation is reported, as
//! [`LookupOutcome::NotFound`].

use async_trait::async_trait;
use home_energy_property_models::RawPropertyRecord;

use crate::LookupError;
use crate::address::generate_address_variations;

/// One search against the property source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyQuery {
    /// Address variation being tried.
    pub address: String,
    /// City name.
    pub city: String,
    /// State / province.
    pub state: String,
    /// Postal code with a trailing wildcard (`"78701*"`).
    pub postal_code_pattern: String,
}

impl PropertyQuery {
    /// Builds a query, appending a wildcard to the postal code so ZIP+4
    /// records still match.
    #[must_use]
    pub fn new(address: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            address: address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            postal_code_pattern: format!("{zip}*"),
        }
    }

    /// Renders the query in the source's search syntax.
    #[must_use]
    pub fn to_search_string(&self) -> String {
        format!(
            "address:(\"{}\") AND city:(\"{}\") AND province:(\"{}\") AND postalCode:({})",
            self.address, self.city, self.state, self.postal_code_pattern
        )
    }
}

/// A source of raw property records.
#[async_trait]
pub trait PropertyLookup: Send + Sync {
    /// Returns a short identifier for logging (e.g. `"datafiniti"`).
    fn id(&self) -> &str;

    /// Runs a single search.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failure, a non-success status,
    /// or an unreadable response.
    async fn search(&self, query: &PropertyQuery) -> Result<Vec<RawPropertyRecord>, LookupError>;
}

/// The record found for an address.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMatch {
    /// The variation that produced the match.
    pub address_variation: String,
    /// First record returned for that variation.
    pub record: RawPropertyRecord,
    /// How many records the source returned.
    pub total_records: usize,
}

/// Result of searching every address variation.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A variation returned at least one record.
    Found(PropertyMatch),
    /// No variation returned any record.
    NotFound {
        /// Number of variations tried.
        attempted: usize,
    },
}

/// Tries each variation in order and returns the first that yields a
/// record.
pub async fn find_first_match(
    lookup: &dyn PropertyLookup,
    variations: &[String],
    city: &str,
    state: &str,
    zip: &str,
) -> LookupOutcome {
    for variation in variations {
        let query = PropertyQuery::new(variation, city, state, zip);
        log::info!(
            "Trying {} query variation: {}",
            lookup.id(),
            query.to_search_string()
        );

        match lookup.search(&query).await {
            Ok(records) => {
                let total_records = records.len();
                if let Some(record) = records.into_iter().next() {
                    log::info!("Found matching property with address variation: {variation}");
                    return LookupOutcome::Found(PropertyMatch {
                        address_variation: variation.clone(),
                        record,
                        total_records,
                    });
                }
                log::debug!("No records for address variation: {variation}");
            }
            Err(e) => {
                log::error!("Error with address variation '{variation}': {e}");
            }
        }
    }

    log::warn!(
        "No property data found for any of {} address variations",
        variations.len()
    );

    LookupOutcome::NotFound {
        attempted: variations.len(),
    }
}

/// Generates variations for `address` and searches them in order.
pub async fn search_address(
    lookup: &dyn PropertyLookup,
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
) -> LookupOutcome {
    let variations = generate_address_variations(address);
    log::info!("Generated address variations: {variations:?}");
    find_first_match(lookup, &variations, city, state, zip).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Scripted lookup keyed by address variation.
    struct FakeLookup {
        responses: BTreeMap<String, Result<usize, u16>>,
        calls: Mutex<Vec<PropertyQuery>>,
    }

    impl FakeLookup {
        fn new(responses: &[(&str, Result<usize, u16>)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), *v))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn called_addresses(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|q| q.address.clone())
                .collect()
        }
    }

    #[async_trait]
    impl PropertyLookup for FakeLookup {
        fn id(&self) -> &str {
            "fake"
        }

        async fn search(
            &self,
            query: &PropertyQuery,
        ) -> Result<Vec<RawPropertyRecord>, LookupError> {
            self.calls.lock().unwrap().push(query.clone());
            match self.responses.get(&query.address) {
                Some(Ok(count)) => Ok((0..*count)
                    .map(|i| RawPropertyRecord::new(json!({ "address": query.address, "n": i })))
                    .collect()),
                Some(Err(status)) => Err(LookupError::Status {
                    status: *status,
                    body: "boom".to_string(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }

    fn variations(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn query_string_appends_zip_wildcard() {
        let query = PropertyQuery::new("123 main st", "Austin", "TX", "78701");
        assert_eq!(
            query.to_search_string(),
            "address:(\"123 main st\") AND city:(\"Austin\") AND province:(\"TX\") AND postalCode:(78701*)"
        );
    }

    #[tokio::test]
    async fn first_success_wins() {
        let lookup = FakeLookup::new(&[("a", Ok(2)), ("b", Ok(1))]);
        let outcome = find_first_match(&lookup, &variations(&["a", "b"]), "c", "s", "1").await;

        let LookupOutcome::Found(found) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(found.address_variation, "a");
        assert_eq!(found.total_records, 2);
        assert_eq!(found.record.as_value()["n"], 0);
        assert_eq!(lookup.called_addresses(), vec!["a"]);
    }

    #[tokio::test]
    async fn empty_results_move_to_next_variation() {
        let lookup = FakeLookup::new(&[("a", Ok(0)), ("b", Ok(1))]);
        let outcome = find_first_match(&lookup, &variations(&["a", "b"]), "c", "s", "1").await;

        assert!(matches!(outcome, LookupOutcome::Found(ref m) if m.address_variation == "b"));
        assert_eq!(lookup.called_addresses(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn transport_failure_is_not_fatal() {
        let lookup = FakeLookup::new(&[("a", Err(503)), ("b", Ok(1))]);
        let outcome = find_first_match(&lookup, &variations(&["a", "b"]), "c", "s", "1").await;

        assert!(matches!(outcome, LookupOutcome::Found(ref m) if m.address_variation == "b"));
    }

    #[tokio::test]
    async fn exhaustion_is_not_found() {
        let lookup = FakeLookup::new(&[("a", Err(401))]);
        let outcome = find_first_match(&lookup, &variations(&["a", "b"]), "c", "s", "1").await;

        assert_eq!(outcome, LookupOutcome::NotFound { attempted: 2 });
        assert_eq!(lookup.called_addresses(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn search_address_tries_abbreviated_form_first() {
        let lookup = FakeLookup::new(&[("123 main street", Ok(1))]);
        let outcome = search_address(&lookup, "123 Main Street", "Austin", "TX", "78701").await;

        assert!(matches!(outcome, LookupOutcome::Found(_)));
        assert_eq!(
            lookup.called_addresses(),
            vec!["123 main st", "123 main street"]
        );
        let calls = lookup.calls.lock().unwrap();
        assert_eq!(calls[0].postal_code_pattern, "78701*");
    }
}
