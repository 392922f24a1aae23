#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the home energy report toolchain.
//!
//! ```text
//! home_energy_cli normalize <record.json>
//! home_energy_cli estimate <record.json> [--occupants 3]
//! home_energy_cli variations "<address>"
//! home_energy_cli lookup --address <a> --city <c> --state <s> --zip <z>
//! home_energy_cli serve
//! ```
//!
//! Running with no subcommand enters interactive mode.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use home_energy_energy::constants::DEFAULT_OCCUPANTS;
use home_energy_energy::factors::occupant_count;
use home_energy_property::normalize;

#[derive(Parser)]
#[command(
    name = "home_energy_cli",
    about = "Normalize property records, estimate energy usage, and run the report server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized profile of a raw property record
    Normalize {
        /// Path to a raw property record (JSON)
        file: PathBuf,
    },
    /// Estimate annual and monthly energy usage for a raw property record
    Estimate {
        /// Path to a raw property record (JSON)
        file: PathBuf,
        /// Number of occupants
        #[arg(long, default_value_t = DEFAULT_OCCUPANTS)]
        occupants: f64,
    },
    /// Print the address variations tried during lookup
    Variations {
        /// Street address
        address: String,
    },
    /// Look up a property from the configured source
    Lookup {
        /// Street address
        #[arg(long)]
        address: String,
        /// City
        #[arg(long)]
        city: String,
        /// State abbreviation
        #[arg(long)]
        state: String,
        /// ZIP code
        #[arg(long)]
        zip: String,
        /// Number of occupants for the estimate
        #[arg(long, default_value_t = DEFAULT_OCCUPANTS)]
        occupants: f64,
    },
    /// Start the HTTP API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run().await;
    };

    match command {
        Commands::Normalize { file } => {
            let record = commands::read_record(&file)?;
            println!("{}", commands::render_profile(&record)?);
        }
        Commands::Estimate { file, occupants } => {
            let record = commands::read_record(&file)?;
            let profile = normalize(&record);
            print!(
                "{}",
                commands::render_estimate(&profile, occupant_count(Some(occupants)))
            );
        }
        Commands::Variations { address } => {
            print!("{}", commands::render_variations(&address));
        }
        Commands::Lookup {
            address,
            city,
            state,
            zip,
            occupants,
        } => {
            let occupants = occupant_count(Some(occupants));
            if let Some(out) = commands::lookup(&address, &city, &state, &zip, occupants).await? {
                print!("{out}");
            } else {
                eprintln!("No property data found for any address variation");
                std::process::exit(1);
            }
        }
        Commands::Serve => serve().await?,
    }

    Ok(())
}

/// Runs the server on its own actix system.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(|| {
        actix_web::rt::System::new().block_on(home_energy_server::run_server())
    })
    .await??;
    Ok(())
}
