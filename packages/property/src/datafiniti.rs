//! Datafiniti property search client.
//!
//! Sends the search query as `POST {base_url}/properties/search` with a
//! bearer token and returns the response's `records` array.
//!
//! See <https://docs.datafiniti.co/docs/property-data-schema>

use std::time::Duration;

use async_trait::async_trait;
use home_energy_property_models::RawPropertyRecord;

use crate::LookupError;
use crate::lookup::{PropertyLookup, PropertyQuery};

/// HTTP client for the Datafiniti property API.
pub struct DatafinitiClient {
    client: reqwest::Client,
    search_url: String,
    api_key: String,
}

impl DatafinitiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            search_url: format!("{}/properties/search", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl PropertyLookup for DatafinitiClient {
    fn id(&self) -> &str {
        "datafiniti"
    }

    async fn search(&self, query: &PropertyQuery) -> Result<Vec<RawPropertyRecord>, LookupError> {
        let body = serde_json::json!({ "query": query.to_search_string() });

        let resp = self
            .client
            .post(&self.search_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::error!("Datafiniti API error: status={status} body={body}");
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_search_response(&body)
    }
}

/// Extracts the records from a search response.
///
/// A response without a `records` list has no matches.
fn parse_search_response(body: &serde_json::Value) -> Result<Vec<RawPropertyRecord>, LookupError> {
    if !body.is_object() {
        return Err(LookupError::Parse {
            message: "Datafiniti response is not an object".to_string(),
        });
    }

    Ok(body
        .get("records")
        .and_then(serde_json::Value::as_array)
        .map(|records| records.iter().cloned().map(RawPropertyRecord::new).collect())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records() {
        let body = serde_json::json!({
            "num_found": 1,
            "records": [{ "address": "123 Main St", "floorSizeValue": 1850 }]
        });
        let records = parse_search_response(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].str_field("address"), Some("123 Main St"));
    }

    #[test]
    fn missing_records_is_empty() {
        let body = serde_json::json!({ "num_found": 0 });
        assert!(parse_search_response(&body).unwrap().is_empty());
    }

    #[test]
    fn non_object_is_parse_error() {
        let body = serde_json::json!([]);
        assert!(matches!(
            parse_search_response(&body),
            Err(LookupError::Parse { .. })
        ));
    }

    #[test]
    fn search_url_ignores_trailing_slash() {
        let client = DatafinitiClient::new("https://api.datafiniti.co/v4/", "key", 5).unwrap();
        assert_eq!(
            client.search_url,
            "https://api.datafiniti.co/v4/properties/search"
        );
    }
}
