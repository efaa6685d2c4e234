//! Call QA Dashboard (callqa-dash) - Main entry point
//!
//! Loads one call's QA results from the analysis API, drives the dashboard
//! headlessly (tab selection, an optional timestamp seek) and writes a
//! printable HTML snapshot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use callqa_common::config::{resolve_config, CONFIG_ENV_VAR};
use callqa_dash::endpoints::record_id_from_page;
use callqa_dash::export::write_snapshot;
use callqa_dash::render::HeadlessDocument;
use callqa_dash::{Dashboard, HttpJsonClient, Tab};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for callqa-dash
#[derive(Parser, Debug)]
#[command(name = "callqa-dash")]
#[command(about = "Call QA review dashboard")]
#[command(version)]
struct Args {
    /// Base URL of the analysis API
    #[arg(long, default_value = "http://127.0.0.1:5000", env = "CALLQA_BASE_URL")]
    base_url: String,

    /// Page path and query, e.g. "/index.html?rid=R1&call=1"
    #[arg(long, default_value = "/")]
    page: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the HTML snapshot
    #[arg(short, long, default_value = "dashboard.html")]
    output: PathBuf,

    /// Tab to show: part1 or part2
    #[arg(long, default_value = "part1")]
    tab: Tab,

    /// Simulate a click on a timestamp control (m:ss)
    #[arg(long)]
    seek: Option<String>,

    /// Render the record overview for the page's rid instead
    #[arg(long)]
    overview: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callqa_dash=info,callqa_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting callqa-dash v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = resolve_config(args.config.as_deref(), CONFIG_ENV_VAR)
        .context("Failed to load configuration")?;

    let client = HttpJsonClient::new(&args.base_url)
        .with_context(|| format!("Invalid base URL {}", args.base_url))?;
    info!("Analysis API: {}", client.base_url());

    let mut dashboard = Dashboard::new(
        Arc::new(client),
        HeadlessDocument::new(),
        config,
        &args.page,
    );

    if args.overview {
        let record_id = record_id_from_page(&args.page)
            .context("--overview needs a page with a rid query parameter")?;
        if !dashboard.show_record_overview(&record_id).await {
            warn!(record_id = %record_id, "Record overview could not be loaded");
        }
        let html = dashboard.export().await;
        write_snapshot(&args.output, &html).await?;
        return Ok(());
    }

    let loaded = dashboard.initialize().await;
    if loaded.is_ok() {
        if let Some(refresh) = dashboard.activate_tab(args.tab).await {
            // Results are applied by the task itself; only wait for completion
            if let Err(e) = refresh.await {
                warn!(error = %e, "Part-2 refresh task failed");
            }
        }
        if let Some(time) = &args.seek {
            let position = dashboard.seek_to_timestamp(time, Instant::now()).await;
            info!(time = %time, position, "Seeked active audio unit");
        }
    }

    let html = dashboard.export().await;
    write_snapshot(&args.output, &html)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    loaded.context("Dashboard did not load")?;
    info!("Done");
    Ok(())
}
