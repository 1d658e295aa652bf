//! autoab — Autoantibody portal facet and network tools.
//! Entry point for the command-line binary.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use autoab_client::{FacetController, HttpPortalClient, InMemoryPortal, PageLimits, PortalApi, SearchSuggester};
use autoab_common::{BiomarkerAssociation, Entry};
use autoab_config::{Config, ConfigError};
use autoab_facets::{apply_named_facet_change, FacetSelection};
use autoab_network::NetworkView;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // Configuration comes first so its log filter can seed the subscriber.
    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    match config_error {
        None => info!(base_url = %config.backend.base_url, "Configuration loaded"),
        Some(ConfigError::NotFound(path)) => {
            warn!("No configuration at {path}, using defaults");
            warn!("Copy autoab.example.toml to autoab.toml and edit it.");
        }
        Some(e) => warn!("Could not load configuration, using defaults: {e}"),
    }

    match args.command {
        Command::Plan { ref facet, ref value } => {
            let change = apply_named_facet_change(facet, value, &FacetSelection::default())?;
            print_json(&change)
        }
        Command::Facet { ref facet, ref value } => {
            let portal = build_portal(&args, &config)?;
            let controller = FacetController::new(portal, PageLimits::from(&config.facets));
            controller.initialize().await;
            controller.change_named(facet, value).await?;
            print_json(&controller.snapshot().await)
        }
        Command::Network { ref query, ref disease } => {
            let portal = build_portal(&args, &config)?;
            let rows = portal
                .search_biomarkers(query)
                .await
                .with_context(|| format!("Biomarker search for {query:?} failed"))?;
            info!(query = %query, rows = rows.len(), "Laying out network");

            let mut view = NetworkView::new(query.as_str());
            if let Some(d) = disease {
                view.select(d.as_str());
            }
            print_json(&view.layout(&rows))
        }
        Command::Suggest { ref query } => {
            let portal = build_portal(&args, &config)?;
            let suggester = SearchSuggester::new(portal, &config.search);
            print_json(&suggester.suggest(query).await)
        }
    }
}

fn build_portal(args: &Args, config: &Config) -> anyhow::Result<Arc<dyn PortalApi>> {
    if args.uses_local_data() {
        let entries: Vec<Entry> = read_rows(args.entries.as_deref())?;
        let associations: Vec<BiomarkerAssociation> = read_rows(args.associations.as_deref())?;
        info!(entries = entries.len(), associations = associations.len(), "Using local record set");
        return Ok(Arc::new(InMemoryPortal::new(entries, associations)));
    }

    info!(base_url = %config.backend.base_url, "Using portal backend");
    let client = HttpPortalClient::from_config(&config.backend)
        .context("Failed to build portal HTTP client")?;
    Ok(Arc::new(client))
}

fn read_rows<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<Vec<T>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
