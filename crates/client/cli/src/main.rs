//! Headless simulator: explores one dungeon and prints the run report.
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use config::CliConfig;
use delve_content::ContentFactory;
use delve_core::SuperRareDailyState;
use delve_runtime::{ContentDirectorySource, Explorer, RunRequest, RuntimeConfig};
use directories::ProjectDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    setup_logging(config.log_dir.as_ref())?;

    let factory = ContentFactory::new(&config.data_dir);
    let runtime = RuntimeConfig::default()
        .with_exploration(factory.load_config()?)
        .with_env_overrides();
    let party = factory.load_party()?;

    let source = ContentDirectorySource::new(&config.data_dir);
    let explorer = Explorer::load(&source, runtime).await?;

    let mut request = RunRequest::new(config.dungeon_id, config.target_floor, party)
        .with_daily(SuperRareDailyState::new(day_key()));
    if let Some(seed) = config.seed {
        request = request.with_seed(seed);
    }

    let report = explorer.start(request)?.join().await?;
    tracing::info!(
        run_id = %report.run_id,
        status = %report.status,
        events = report.outcomes.len(),
        digest = %report.digest,
        "simulation complete"
    );

    let json = serde_json::to_string_pretty(&report).context("Failed to encode run report")?;
    println!("{json}");
    Ok(())
}

/// Days since the common era, used as the super-rare gate's day key.
fn day_key() -> u32 {
    u32::try_from(Utc::now().date_naive().num_days_from_ce()).unwrap_or_default()
}

/// Setup logging to both stderr and file
fn setup_logging(log_dir: Option<&PathBuf>) -> Result<()> {
    let log_dir = log_dir.cloned().unwrap_or_else(default_log_directory);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "delve.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    // stdout carries the JSON report
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Log file: {}/delve.log", log_dir.display());
    Ok(())
}

fn default_log_directory() -> PathBuf {
    ProjectDirs::from("", "", "delve")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("delve").join("logs"))
}
