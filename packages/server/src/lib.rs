#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for home energy reports.
//!
//! Creates reports from user-selected addresses, enriches them with
//! external property data, and serves each report with its energy
//! estimate. Reports are persisted in a `DuckDB` file (see
//! [`home_energy_report::paths::reports_db_path`]).

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use home_energy_property::LookupError;
use home_energy_property::lookup::PropertyLookup;
use home_energy_property::service_registry;
use home_energy_report::{DuckDbReportStore, ReportError, ReportStore};
use thiserror::Error;

/// Shared application state.
pub struct AppState {
    /// Report persistence.
    pub reports: Arc<dyn ReportStore>,
    /// External property data source.
    pub lookup: Arc<dyn PropertyLookup>,
}

/// Errors that prevent the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report database could not be opened.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The property lookup service is not configured.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/reports", web::post().to(handlers::create_report))
            .route(
                "/reports/from-place",
                web::post().to(handlers::create_report_from_place),
            )
            .route("/reports/{id}", web::get().to(handlers::get_report))
            .route(
                "/property-details",
                web::post().to(handlers::property_details),
            ),
    );
}

/// Starts the home energy report API server.
///
/// Opens the report database, connects the first enabled property lookup
/// service, and serves on `BIND_ADDR`:`PORT` (default `127.0.0.1:8080`).
/// The caller is responsible for the async runtime and logger.
///
/// # Errors
///
/// Returns [`ServerError`] if the database cannot be opened, no lookup
/// service is usable, or the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    log::info!("Opening report database...");
    let reports = DuckDbReportStore::open_default()?;

    log::info!("Connecting property lookup service...");
    let lookup = service_registry::default_lookup()?;
    log::info!("Using property lookup service: {}", lookup.id());

    let state = web::Data::new(AppState {
        reports: Arc::new(reports),
        lookup: Arc::from(lookup),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
