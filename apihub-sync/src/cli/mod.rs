use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::adapters::apihub::wire::{ApiData, CollectApiDataRequest};
use crate::adapters::{ApiHubClient, SwaggerHubClient};
use crate::config::Config;
use crate::domain::{TargetApiMetadata, UpsertBatch};
use crate::error::Result;
use crate::server::{self, AppState};
use crate::services::{PreparedSync, SyncReport, SyncService};

#[derive(Parser)]
#[command(name = "apihub-sync")]
#[command(about = "Sync a SwaggerHub API catalog into API hub")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Serve the POST /sync trigger")]
    Serve {
        #[arg(long, help = "Port to listen on (defaults to $PORT or 8080)")]
        port: Option<u16>,
    },

    #[command(about = "Run one sync pass and submit it to API hub")]
    Sync {
        #[arg(long, help = "API hub plugin instance id")]
        plugin_instance: String,

        #[arg(long, help = "SwaggerHub owner (defaults to $SWAGGERHUB_OWNER)")]
        owner: Option<String>,
    },

    #[command(about = "List, fetch and translate without submitting")]
    Preview {
        #[arg(long, help = "SwaggerHub owner (defaults to $SWAGGERHUB_OWNER)")]
        owner: Option<String>,

        #[arg(long, help = "Wrap the JSON in the full collectApiData request for this instance")]
        plugin_instance: Option<String>,
    },
}

type Service = SyncService<SwaggerHubClient, ApiHubClient>;

fn build_service(config: &Config) -> Result<Service> {
    let catalog = SwaggerHubClient::from_config(&config.swaggerhub)?;
    let sink = ApiHubClient::from_config(&config.apihub)?;
    Ok(SyncService::new(Arc::new(catalog), Arc::new(sink)))
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let service = build_service(&config)?;
            server::serve(Arc::new(AppState { service, config }), port).await
        }
        Commands::Sync {
            plugin_instance,
            owner,
        } => {
            if owner.is_some() {
                config.swaggerhub.owner = owner;
            }
            let plugin_instance = config.plugin_instance(&plugin_instance)?;
            let service = build_service(&config)?;
            let report = service.sync(config.owner()?, plugin_instance).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Preview {
            owner,
            plugin_instance,
        } => {
            if owner.is_some() {
                config.swaggerhub.owner = owner;
            }
            let service = build_service(&config)?;
            let prepared = service.prepare(config.owner()?).await?;
            if cli.json {
                let payload =
                    preview_payload(&config, &prepared.api_metadata, plugin_instance.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_preview(&prepared);
            }
            Ok(())
        }
    }
}

/// The JSON a sync pass would submit. Without a plugin instance only the
/// `apiData` block is rendered, since the request envelope needs a location.
fn preview_payload(
    config: &Config,
    apis: &[TargetApiMetadata],
    plugin_instance: Option<&str>,
) -> Result<serde_json::Value> {
    let payload = match plugin_instance {
        Some(instance) => {
            let batch = UpsertBatch::new(config.plugin_instance(instance)?, apis.to_vec());
            serde_json::to_value(CollectApiDataRequest::from(&batch))?
        }
        None => serde_json::to_value(ApiData::from(apis))?,
    };
    Ok(payload)
}

fn print_report(report: &SyncReport) {
    println!("APIs listed:    {}", report.apis_listed);
    println!("Specs fetched:  {}", report.specs_fetched);
    println!("APIs submitted: {}", report.apis_submitted);
    if let Some(op) = &report.operation {
        println!("Operation:      {op}");
    }
    print_failures(&report.fetch_failures);
}

fn print_preview(prepared: &PreparedSync) {
    for api in &prepared.api_metadata {
        let owner = api.owner.as_ref().map_or("-", |o| o.email.as_str());
        println!(
            "{} ({}) version {} | owner {} | {} spec(s)",
            api.original_id,
            api.display_name,
            api.version.original_id,
            owner,
            api.version.specs.len()
        );
    }
    println!();
    println!(
        "{} APIs, {} specs fetched",
        prepared.apis_listed, prepared.specs_fetched
    );
    print_failures(&prepared.fetch_failures);
}

fn print_failures(failures: &[crate::services::FetchFailure]) {
    if failures.is_empty() {
        return;
    }
    println!("Spec fetch failures:");
    for failure in failures {
        println!("  {}: {} ({})", failure.api, failure.url, failure.reason);
    }
}
