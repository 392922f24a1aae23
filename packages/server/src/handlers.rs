//! HTTP handler functions for the home energy report API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use home_energy_energy::constants::DEFAULT_OCCUPANTS;
use home_energy_energy::{estimate, parse_occupants};
use home_energy_energy_models::EnergyEstimate;
use home_energy_report::address::extract_address_details;
use home_energy_report::{EnrichmentOutcome, ReportError, enrich_report};
use home_energy_report_models::{AddressDetails, EnrichmentRequest, PlaceResult, ReportId};
use home_energy_server_models::{
    ApiCreatedReport, ApiError, ApiHealth, ApiPropertyDetails, ApiReport, ReportQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/reports`
///
/// Creates a report for an already-extracted address.
pub async fn create_report(
    state: web::Data<AppState>,
    body: web::Json<AddressDetails>,
) -> HttpResponse {
    store_new_report(&state, body.into_inner()).await
}

/// `POST /api/reports/from-place`
///
/// Creates a report from a raw map place result.
pub async fn create_report_from_place(
    state: web::Data<AppState>,
    body: web::Json<PlaceResult>,
) -> HttpResponse {
    let details = extract_address_details(&body);
    store_new_report(&state, details).await
}

async fn store_new_report(state: &AppState, details: AddressDetails) -> HttpResponse {
    log::info!(
        "Creating report for {}, {}, {} {}",
        details.address,
        details.city,
        details.state,
        details.zip
    );

    match state.reports.create_report(details).await {
        Ok(id) => HttpResponse::Created().json(ApiCreatedReport { id }),
        Err(e) => {
            log::error!("Failed to create report: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to create report"))
        }
    }
}

/// `GET /api/reports/{id}`
///
/// Returns the report with an energy estimate for `?occupants=N`
/// (default 3).
pub async fn get_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let id = ReportId::new(path.into_inner());

    let report = match state.reports.get_report(&id).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            return HttpResponse::NotFound().json(ApiError::new(format!("Report not found: {id}")));
        }
        Err(e) => {
            log::error!("Failed to load report {id}: {e}");
            return HttpResponse::InternalServerError().json(ApiError::new("Failed to load report"));
        }
    };

    let occupants = params
        .occupants
        .as_deref()
        .map_or(DEFAULT_OCCUPANTS, parse_occupants);

    let energy_estimate = report
        .profile
        .as_ref()
        .map_or_else(EnergyEstimate::unavailable, |profile| {
            estimate(profile, Some(occupants))
        });

    HttpResponse::Ok().json(ApiReport {
        status: report.enrichment_status(),
        occupants,
        annual_usage_display: energy_estimate.annual_usage_kwh.to_string(),
        energy_estimate,
        report,
    })
}

/// `POST /api/property-details`
///
/// Looks up the property behind a report and stores its profile.
pub async fn property_details(
    state: web::Data<AppState>,
    body: web::Json<EnrichmentRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    log::info!("Received property details request: {request:?}");

    match enrich_report(state.reports.as_ref(), state.lookup.as_ref(), &request).await {
        Ok(EnrichmentOutcome::Enriched { report_id, .. }) => {
            log::info!("Successfully updated property data for {report_id}");
            HttpResponse::Ok().json(ApiPropertyDetails {
                message: "Property data updated successfully".to_string(),
                property_id: report_id,
            })
        }
        Ok(EnrichmentOutcome::InvalidRequest { missing }) => HttpResponse::BadRequest().json(
            ApiError::new("Missing required parameters: propertyId, address, city, state, or zip")
                .with_details(missing.join(", ")),
        ),
        Ok(EnrichmentOutcome::NotFound { .. }) => {
            HttpResponse::NotFound().json(ApiError::new("No property data found"))
        }
        Err(ReportError::NotFound { id }) => {
            HttpResponse::NotFound().json(ApiError::new(format!("Report not found: {id}")))
        }
        Err(e) => {
            log::error!("Error processing property data: {e}");
            if let Some(id) = request.property_id.as_deref()
                && let Err(record_err) = state
                    .reports
                    .record_enrichment_error(&ReportId::new(id), &e.to_string(), Utc::now())
                    .await
            {
                log::error!("Failed to record enrichment error for {id}: {record_err}");
            }
            HttpResponse::InternalServerError().json(
                ApiError::new("Failed to process property data").with_details(e.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use home_energy_property::LookupError;
    use home_energy_property::lookup::{PropertyLookup, PropertyQuery};
    use home_energy_property_models::RawPropertyRecord;
    use home_energy_report::MemoryReportStore;
    use serde_json::{Value, json};

    use crate::AppState;

    /// Finds a record only for the abbreviated form of "123 Main Street".
    struct FakeLookup;

    #[async_trait]
    impl PropertyLookup for FakeLookup {
        fn id(&self) -> &str {
            "fake"
        }

        async fn search(
            &self,
            query: &PropertyQuery,
        ) -> Result<Vec<RawPropertyRecord>, LookupError> {
            if query.address == "123 main st" {
                Ok(vec![RawPropertyRecord::new(json!({
                    "address": "123 Main St",
                    "floorSizeValue": 2000,
                    "yearBuilt": 2015
                }))])
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState {
            reports: Arc::new(MemoryReportStore::new()),
            lookup: Arc::new(FakeLookup),
        })
    }

    fn address(street: &str) -> Value {
        json!({
            "address": street,
            "city": "Austin",
            "state": "TX",
            "zip": "78701"
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
    }

    #[actix_web::test]
    async fn creates_enriches_and_estimates_report() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(address("123 Main Street"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let mut request = address("123 Main Street");
        request["propertyId"] = json!(id);
        let req = test::TestRequest::post()
            .uri("/api/property-details")
            .set_json(&request)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["propertyId"], json!(id));

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports/{id}?occupants=1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "enriched");
        assert_eq!(body["propertyData"]["floorSizeSqFt"], 2000.0);
        assert!(body["energyEstimate"]["annualUsageKwh"].as_f64().unwrap() > 0.0);
        assert_eq!(
            body["energyEstimate"]["monthlyUsage"]
                .as_array()
                .unwrap()
                .len(),
            12
        );
    }

    #[actix_web::test]
    async fn pending_report_estimate_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(address("9 Elm Road"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports/{id}?occupants=abc"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "pending");
        assert_eq!(body["occupants"], 3.0);
        assert_eq!(body["energyEstimate"]["annualUsageKwh"], "unavailable");
        assert_eq!(body["annualUsageDisplay"], "N/A");
    }

    #[actix_web::test]
    async fn unknown_report_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/reports/does-not-exist")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn property_details_status_codes() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/property-details")
            .set_json(json!({ "propertyId": "abc", "address": "1 A St" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(address("77 Nowhere Lane"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        let mut request = address("77 Nowhere Lane");
        request["propertyId"] = created["id"].clone();
        let req = test::TestRequest::post()
            .uri("/api/property-details")
            .set_json(&request)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No property data found");
    }

    #[actix_web::test]
    async fn creates_report_from_place() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(crate::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports/from-place")
            .set_json(json!({
                "address_components": [
                    { "long_name": "123", "short_name": "123", "types": ["street_number"] },
                    { "long_name": "Main Street", "short_name": "Main St", "types": ["route"] },
                    { "long_name": "Austin", "short_name": "Austin", "types": ["locality"] }
                ],
                "geometry": { "location": { "lat": 30.27, "lng": -97.74 } }
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mapsData"]["address"], "123 Main St");
        assert_eq!(body["mapsData"]["latitude"], 30.27);
    }
}
