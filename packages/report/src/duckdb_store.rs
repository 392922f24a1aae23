//! Report store backed by a `DuckDB` file.
//!
//! One row per report. The address and each profile section are stored
//! as JSON text so the profile schema can grow without migrations.
//! Timestamps are RFC 3339 strings.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{Connection, params};
use home_energy_property_models::PropertyProfile;
use home_energy_report_models::{AddressDetails, MapsData, PropertyReport, ReportId};

use crate::ReportError;
use crate::store::{ReportStore, new_report_id};

/// `DuckDB`-backed [`ReportStore`].
///
/// `duckdb::Connection` is `Send` but not `Sync`, so it is wrapped in a
/// `Mutex`. Queries are short and never held across an `.await`.
pub struct DuckDbReportStore {
    conn: Mutex<Connection>,
}

impl DuckDbReportStore {
    /// Opens (or creates) the report database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the directory, connection, or schema
    /// cannot be created.
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        if let Some(parent) = path.parent() {
            crate::paths::ensure_dir(parent)?;
        }

        log::info!("Opening report database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens the report database at the default path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the connection or schema creation fails.
    pub fn open_default() -> Result<Self, ReportError> {
        Self::open(&crate::paths::reports_db_path())
    }

    /// Opens a transient in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the connection or schema creation fails.
    pub fn open_in_memory() -> Result<Self, ReportError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, ReportError> {
        create_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn create_schema(conn: &Connection) -> Result<(), ReportError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            maps_data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            property_data TEXT,
            neighborhood_data TEXT,
            risk_data TEXT,
            datafiniti_fetched_at TEXT,
            datafiniti_error TEXT,
            updated_at TEXT
        );",
    )?;
    Ok(())
}

fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, ReportError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ReportError::Conversion {
            message: format!("invalid {column} timestamp '{value}': {e}"),
        })
}

fn parse_optional_timestamp(
    column: &str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, ReportError> {
    value.map(|v| parse_timestamp(column, &v)).transpose()
}

/// Reassembles the profile when all three sections are present.
fn parse_profile(
    property_data: Option<String>,
    neighborhood_data: Option<String>,
    risk_data: Option<String>,
) -> Result<Option<PropertyProfile>, ReportError> {
    let (Some(property), Some(neighborhood), Some(risk)) =
        (property_data, neighborhood_data, risk_data)
    else {
        return Ok(None);
    };

    Ok(Some(PropertyProfile {
        property_data: serde_json::from_str(&property)?,
        neighborhood_data: serde_json::from_str(&neighborhood)?,
        risk_data: serde_json::from_str(&risk)?,
    }))
}

#[async_trait]
impl ReportStore for DuckDbReportStore {
    async fn create_report(&self, details: AddressDetails) -> Result<ReportId, ReportError> {
        let id = new_report_id();
        let created_at = Utc::now();
        let maps_data = serde_json::to_string(&details)?;

        self.conn().execute(
            "INSERT INTO reports (id, maps_data, created_at) VALUES (?, ?, ?)",
            params![id.as_str(), maps_data, created_at.to_rfc3339()],
        )?;

        log::debug!("Created report {id}");
        Ok(id)
    }

    async fn get_report(&self, id: &ReportId) -> Result<Option<PropertyReport>, ReportError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT maps_data, created_at, property_data, neighborhood_data, risk_data,
                    datafiniti_fetched_at, datafiniti_error, updated_at
             FROM reports WHERE id = ?",
        )?;
        let mut rows = stmt.query(params![id.as_str()])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let maps_data: String = row.get(0)?;
        let created_at: String = row.get(1)?;
        let property_data: Option<String> = row.get(2)?;
        let neighborhood_data: Option<String> = row.get(3)?;
        let risk_data: Option<String> = row.get(4)?;
        let fetched_at: Option<String> = row.get(5)?;
        let error: Option<String> = row.get(6)?;
        let updated_at: Option<String> = row.get(7)?;

        Ok(Some(PropertyReport {
            id: id.clone(),
            maps_data: MapsData {
                details: serde_json::from_str(&maps_data)?,
                created_at: parse_timestamp("created_at", &created_at)?,
            },
            profile: parse_profile(property_data, neighborhood_data, risk_data)?,
            datafiniti_fetched_at: parse_optional_timestamp("datafiniti_fetched_at", fetched_at)?,
            datafiniti_error: error,
            updated_at: parse_optional_timestamp("updated_at", updated_at)?,
        }))
    }

    async fn record_enrichment(
        &self,
        id: &ReportId,
        profile: &PropertyProfile,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let property_data = serde_json::to_string(&profile.property_data)?;
        let neighborhood_data = serde_json::to_string(&profile.neighborhood_data)?;
        let risk_data = serde_json::to_string(&profile.risk_data)?;

        let updated = self.conn().execute(
            "UPDATE reports
             SET property_data = ?, neighborhood_data = ?, risk_data = ?,
                 datafiniti_fetched_at = ?, datafiniti_error = NULL, updated_at = ?
             WHERE id = ?",
            params![
                property_data,
                neighborhood_data,
                risk_data,
                fetched_at.to_rfc3339(),
                Utc::now().to_rfc3339(),
                id.as_str(),
            ],
        )?;

        if updated == 0 {
            return Err(ReportError::NotFound { id: id.clone() });
        }

        log::debug!("Recorded enrichment for report {id}");
        Ok(())
    }

    async fn record_enrichment_error(
        &self,
        id: &ReportId,
        message: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let updated = self.conn().execute(
            "UPDATE reports SET datafiniti_error = ?, datafiniti_fetched_at = ? WHERE id = ?",
            params![message, fetched_at.to_rfc3339(), id.as_str()],
        )?;

        if updated == 0 {
            return Err(ReportError::NotFound { id: id.clone() });
        }

        log::debug!("Recorded enrichment error for report {id}: {message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use home_energy_property_models::{PropertyData, RiskData, RiskLevel};
    use home_energy_report_models::EnrichmentStatus;

    fn details() -> AddressDetails {
        AddressDetails {
            address: "123 Main St #4".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip: "78701".to_string(),
            latitude: Some(30.27),
            longitude: Some(-97.74),
            ..AddressDetails::default()
        }
    }

    #[tokio::test]
    async fn round_trips_created_report() {
        let store = DuckDbReportStore::open_in_memory().unwrap();
        let id = store.create_report(details()).await.unwrap();

        let report = store.get_report(&id).await.unwrap().unwrap();
        assert_eq!(report.maps_data.details, details());
        assert_eq!(report.enrichment_status(), EnrichmentStatus::Pending);
        assert!(report.updated_at.is_none());
    }

    #[tokio::test]
    async fn stores_profile_sections() {
        let store = DuckDbReportStore::open_in_memory().unwrap();
        let id = store.create_report(details()).await.unwrap();

        let profile = PropertyProfile {
            property_data: PropertyData {
                floor_size_sq_ft: Some(1800.0),
                has_pool: true,
                ..PropertyData::default()
            },
            risk_data: RiskData {
                flood_risk: Some(RiskLevel::High),
                ..RiskData::default()
            },
            ..PropertyProfile::default()
        };
        store
            .record_enrichment(&id, &profile, Utc::now())
            .await
            .unwrap();

        let report = store.get_report(&id).await.unwrap().unwrap();
        assert_eq!(report.profile, Some(profile));
        assert!(report.datafiniti_fetched_at.is_some());
        assert!(report.updated_at.is_some());
    }

    #[tokio::test]
    async fn stores_error() {
        let store = DuckDbReportStore::open_in_memory().unwrap();
        let id = store.create_report(details()).await.unwrap();
        store
            .record_enrichment_error(&id, "No property data found", Utc::now())
            .await
            .unwrap();

        let report = store.get_report(&id).await.unwrap().unwrap();
        assert_eq!(report.enrichment_status(), EnrichmentStatus::Failed);
        assert_eq!(
            report.datafiniti_error.as_deref(),
            Some("No property data found")
        );
    }

    #[tokio::test]
    async fn missing_report() {
        let store = DuckDbReportStore::open_in_memory().unwrap();
        let id = ReportId::new("missing");
        assert!(store.get_report(&id).await.unwrap().is_none());

        let err = store
            .record_enrichment(&id, &PropertyProfile::default(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NotFound { .. }));
    }
}
