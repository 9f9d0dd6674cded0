//! Headless runner: paces a bug world at a fixed tick rate until the
//! population dies out, a cycle limit is hit or the process is asked to stop.

mod driver;
mod report;
mod telemetry;

use anyhow::{Context, Result};
use bugs_core::{RunId, RunnerConfig};
use bugs_world::World;
use chrono::Utc;
use tokio::signal;
use tokio::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => RunnerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => RunnerConfig::default(),
    };

    let run_id = RunId::new();
    let world_config = &config.simulation.world;
    info!(
        %run_id,
        width = world_config.width,
        height = world_config.height,
        organisms = world_config.initial_organism_count,
        reseed_rate = world_config.reseed_rate,
        tick_rate_hz = config.tick_rate_hz,
        "Starting bug world runner"
    );

    let mut world = World::with_config(config.simulation.clone())?;
    world.initialize();

    let started_at = Utc::now();
    let driver = driver::Driver::new(world, &config);

    let status = tokio::spawn(driver::report_status(
        driver.world(),
        Duration::from_secs(config.status_interval_secs.max(1)),
    ));
    let stopped = driver.run(shutdown_signal()).await;
    status.abort();
    let stop_reason = stopped?;

    let report = {
        let world = driver.world();
        let world = world.read();
        report::RunReport::new(run_id, started_at, Utc::now(), stop_reason, &world)
    };

    let last = report.history.last();
    info!(
        %run_id,
        stop_reason = ?report.stop_reason,
        cycles = report.cycles,
        final_population = report.final_population,
        final_resource_count = report.final_resource_count,
        births = report.totals.births,
        deaths = report.totals.deaths,
        last_recorded_cycle = ?last.map(|entry| entry.cycle),
        "Run complete"
    );

    if let Some(path) = &config.report_path {
        report.write_json(path)?;
        info!(path = %path, "Report written");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
