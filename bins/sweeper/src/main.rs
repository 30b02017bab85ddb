//! Leavebook sweeper
//!
//! Loads the leave policy from a JSON fixture and runs the scheduled sweeps
//! (auto-approval, carry-over, expiry) on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use leavebook_engine::{Fixture, LeaveEngine, SystemClock, TracingDispatcher};
use leavebook_shared::{AppConfig, LogConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    let raw = tokio::fs::read_to_string(&config.sweeper.fixture_path)
        .await
        .with_context(|| format!("failed to read fixture {}", config.sweeper.fixture_path))?;
    let fixture = Fixture::from_json(&raw).context("invalid fixture")?;
    let engine = LeaveEngine::from_fixture(
        fixture,
        Arc::new(TracingDispatcher),
        Arc::new(SystemClock),
    )
    .context("failed to build engine")?;
    let engine = Arc::new(engine);
    info!(
        fixture = %config.sweeper.fixture_path,
        interval_secs = config.sweeper.interval_secs,
        "Sweeper started"
    );

    if config.sweeper.run_once {
        sweep(&engine).await;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sweeper.interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => sweep(&engine).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn sweep(engine: &Arc<LeaveEngine>) {
    let engine = Arc::clone(engine);
    match tokio::task::spawn_blocking(move || engine.run_sweeps()).await {
        Ok(Ok(report)) => info!(?report, "Sweep finished"),
        Ok(Err(err)) => error!(error = %err, "Sweep failed"),
        Err(err) => error!(error = %err, "Sweep task panicked"),
    }
}
