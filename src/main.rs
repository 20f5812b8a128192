use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use nachtleven::apis::collect_events;
use nachtleven::apis::factory::{
    create_enabled_providers, create_providers, parse_provider_names,
};
use nachtleven::apis::html::HtmlFetcher;
use nachtleven::common::constants::{get_supported_apis, venue_name_for};
use nachtleven::config::{self, Config};
use nachtleven::server::{start_server, AppState};
use nachtleven::{logging, metrics};

#[derive(Parser)]
#[command(name = "nachtleven")]
#[command(about = "Ghent venue event aggregator")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file (defaults to NACHTLEVEN_CONFIG or config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the combined events page (default)
    Serve,
    /// Scrape once and print the events
    Scrape {
        /// Specific providers to run (comma-separated). Available: palmarium, wintercircus, kompass
        #[arg(long)]
        providers: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the supported providers
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG may come from .env, so load it before the filter is built
    config::load_env_file(None);
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let fetcher = HtmlFetcher::new(&config.http).context("failed to build HTTP client")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            metrics::init_metrics();
            let providers = create_enabled_providers(&config.providers, &fetcher);
            if providers.is_empty() {
                warn!("No providers enabled; the events page will be empty");
            }
            info!(
                "Serving events from: {}",
                providers
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let addr = config.socket_addr()?;
            start_server(AppState::new(providers), &config.server, addr).await?;
        }
        Commands::Scrape { providers, json } => {
            let providers = match providers {
                Some(list) => {
                    let names = parse_provider_names(&list);
                    create_providers(&names, &config.providers, &fetcher)
                }
                None => create_enabled_providers(&config.providers, &fetcher),
            };

            let events = collect_events(&providers).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                println!("\n📊 {} events", events.len());
                for event in &events {
                    println!("   {}  {} @ {}", event.date, event.title, event.location);
                }
            }
        }
        Commands::Providers => {
            for name in get_supported_apis() {
                let enabled = if config.providers.enabled.iter().any(|e| e == name) {
                    "enabled"
                } else {
                    "disabled"
                };
                println!(
                    "{:<14} {:<24} {}",
                    name,
                    venue_name_for(name).unwrap_or(""),
                    enabled
                );
            }
        }
    }

    Ok(())
}
