#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the conflict map toolchain.
//!
//! Subcommands run the API server or print summaries of the UCDP events
//! for Mexico straight to the terminal. Without a subcommand the user
//! picks a tool from an interactive menu.

mod report;

use clap::{Parser, Subcommand};
use conflict_map_analytics::{TypeFilter, aggregate_by_region};
use conflict_map_markers::DEFAULT_YEAR;
use conflict_map_region_models as regions;
use conflict_map_source::{EventQuery, EventSource, SourceError, UcdpClient};
use dialoguer::{Input, Select};

#[derive(Parser)]
#[command(name = "conflict_map_cli", about = "Conflict map toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Prompt for bind address, port and access token first
        #[arg(long)]
        interactive: bool,
    },
    /// Fetch one year of events and print per-type counts
    Summary {
        /// Calendar year (defaults to the map's initial year)
        #[arg(long)]
        year: Option<i32>,
        /// State to print statistics for (accents optional)
        #[arg(long)]
        region: Option<String>,
        /// Comma-separated violence types to keep (e.g. "non-state,one-sided")
        #[arg(long)]
        types: Option<String>,
    },
    /// List the Mexican states known to the region resolver
    Regions,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error("Unknown region '{name}'")]
    UnknownRegion { name: String },
}

/// Tools offered by the interactive menu.
enum Tool {
    Server,
    Summary,
    Regions,
}

impl Tool {
    const ALL: &[Self] = &[Self::Server, Self::Summary, Self::Regions];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start server",
            Self::Summary => "Summarize a year of events",
            Self::Regions => "List states",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let command = match cli.command {
        Some(command) => command,
        None => prompt_command()?,
    };

    run(command).await?;
    Ok(())
}

fn prompt_command() -> Result<Commands, CliError> {
    println!("Conflict Map Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();
    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match Tool::ALL[idx] {
        Tool::Server => Commands::Serve { interactive: true },
        Tool::Summary => {
            let year: i32 = Input::new()
                .with_prompt("Year")
                .default(DEFAULT_YEAR)
                .interact_text()?;
            let region: String = Input::new()
                .with_prompt("State (leave empty for all)")
                .allow_empty(true)
                .interact_text()?;
            Commands::Summary {
                year: Some(year),
                region: Some(region).filter(|r| !r.trim().is_empty()),
                types: None,
            }
        }
        Tool::Regions => Commands::Regions,
    })
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve { interactive } => {
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(async move {
                    if interactive {
                        conflict_map_server::interactive::run().await
                    } else {
                        conflict_map_server::run_server().await
                    }
                })
            })
            .await??;
        }
        Commands::Summary {
            year,
            region,
            types,
        } => {
            let region = region
                .map(|name| {
                    regions::find(&name).ok_or(CliError::UnknownRegion { name })
                })
                .transpose()?;
            let filter = types
                .as_deref()
                .map(TypeFilter::parse_list)
                .unwrap_or_default();
            let year = year.unwrap_or(DEFAULT_YEAR);

            let client = UcdpClient::from_env()?;
            let page = client.fetch(&EventQuery::events(Some(year), None)).await?;
            log::info!(
                "Fetched {} of {} events for {year}",
                page.events.len(),
                page.total_count
            );

            println!("{year}: {}", report::type_summary(&page.events, &filter));
            if let Some(region) = region {
                let mut aggregate = aggregate_by_region(&page.events, region);
                aggregate.year = Some(year);
                println!("{}", report::region_report(region, &aggregate));
            }
        }
        Commands::Regions => {
            print!("{}", report::region_table(regions::all()));
        }
    }
    Ok(())
}
