//! Interactive mode: pick a tool, then answer its prompts.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use home_energy_energy::constants::DEFAULT_OCCUPANTS;
use home_energy_energy::parse_occupants;
use home_energy_property::normalize;

use crate::commands;

/// Top-level tool selection.
enum Tool {
    Normalize,
    Estimate,
    Variations,
    Lookup,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Normalize,
        Self::Estimate,
        Self::Variations,
        Self::Lookup,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Normalize => "Normalize a property record",
            Self::Estimate => "Estimate energy usage",
            Self::Variations => "Show address variations",
            Self::Lookup => "Look up a property",
            Self::Server => "Start server",
        }
    }
}

fn prompt(label: &str) -> Result<String, dialoguer::Error> {
    Input::new().with_prompt(label).interact_text()
}

fn prompt_occupants() -> Result<f64, dialoguer::Error> {
    let input: String = Input::new()
        .with_prompt("Occupants")
        .default(DEFAULT_OCCUPANTS.to_string())
        .interact_text()?;
    Ok(parse_occupants(&input))
}

/// Runs the interactive tool menu.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected tool fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Home Energy Report Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Normalize => {
            let file = PathBuf::from(prompt("Record file (JSON)")?);
            let record = commands::read_record(&file)?;
            println!("{}", commands::render_profile(&record)?);
        }
        Tool::Estimate => {
            let file = PathBuf::from(prompt("Record file (JSON)")?);
            let occupants = prompt_occupants()?;
            let record = commands::read_record(&file)?;
            print!(
                "{}",
                commands::render_estimate(&normalize(&record), occupants)
            );
        }
        Tool::Variations => {
            let address = prompt("Street address")?;
            print!("{}", commands::render_variations(&address));
        }
        Tool::Lookup => {
            let address = prompt("Street address")?;
            let city = prompt("City")?;
            let state = prompt("State")?;
            let zip = prompt("ZIP code")?;
            let occupants = prompt_occupants()?;
            match commands::lookup(&address, &city, &state, &zip, occupants).await? {
                Some(out) => print!("{out}"),
                None => println!("No property data found for any address variation"),
            }
        }
        Tool::Server => {
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(home_energy_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}
