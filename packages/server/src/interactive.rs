//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port, and report database location
//! before starting the server.

use dialoguer::{Confirm, Input};
use home_energy_report::paths::{REPORTS_DB_PATH_ENV, reports_db_path};

use crate::ServerError;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Sets `BIND_ADDR`, `PORT`, and `REPORTS_DB_PATH` from the answers and
/// delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns [`ServerError`] if the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("Home Energy Report Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8080".to_string())
        .interact_text()
        .unwrap_or_else(|_| "8080".to_string());

    let default_db = reports_db_path().display().to_string();
    let db_path: String = Input::new()
        .with_prompt("Report database")
        .default(default_db.clone())
        .interact_text()
        .unwrap_or(default_db);

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
        std::env::set_var(REPORTS_DB_PATH_ENV, &db_path);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
