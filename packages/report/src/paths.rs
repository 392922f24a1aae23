//! Location of the report database.

use std::path::{Path, PathBuf};

/// Environment variable overriding the report database path.
pub const REPORTS_DB_PATH_ENV: &str = "REPORTS_DB_PATH";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the report database path: `$REPORTS_DB_PATH` if set, otherwise
/// `data/reports.duckdb` under the project root.
#[must_use]
pub fn reports_db_path() -> PathBuf {
    std::env::var_os(REPORTS_DB_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(|| data_dir().join("reports.duckdb"), PathBuf::from)
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_project_root() {
        assert!(data_dir().starts_with(project_root()));
        assert!(data_dir().ends_with("data"));
    }
}
