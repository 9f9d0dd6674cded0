//! Fixed-rate stepping of a shared world.

use anyhow::Result;
use bugs_core::RunnerConfig;
use bugs_world::{StepOutcome, World};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// World shared between the stepping loop (sole writer) and readers such as
/// the status reporter. Readers take the lock between steps only.
pub type SharedWorld = Arc<RwLock<World>>;

/// Why the driver stopped stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Extinct,
    CycleLimit,
    Shutdown,
}

pub struct Driver {
    world: SharedWorld,
    tick: Duration,
    max_cycles: Option<u64>,
}

impl Driver {
    pub fn new(world: World, config: &RunnerConfig) -> Self {
        Self {
            world: Arc::new(RwLock::new(world)),
            tick: Duration::from_secs_f64(1.0 / f64::from(config.tick_rate_hz.max(1))),
            max_cycles: config.max_cycles,
        }
    }

    pub fn world(&self) -> SharedWorld {
        self.world.clone()
    }

    /// Step once per tick until the population dies out, the cycle limit is
    /// reached or `shutdown` resolves. Late ticks are skipped, not replayed.
    #[instrument(skip(self, shutdown), fields(tick_ms = self.tick.as_millis() as u64))]
    pub async fn run<F>(&self, shutdown: F) -> Result<StopReason>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Stopping on shutdown request");
                    return Ok(StopReason::Shutdown);
                }
                _ = ticker.tick() => {
                    let (outcome, cycle) = {
                        let mut world = self.world.write();
                        let outcome = world.step()?;
                        (outcome, world.cycle())
                    };

                    if outcome == StepOutcome::Extinct {
                        info!(cycle, "Stopping: population extinct");
                        return Ok(StopReason::Extinct);
                    }
                    if self.max_cycles.is_some_and(|max| cycle >= max) {
                        info!(cycle, "Stopping: cycle limit reached");
                        return Ok(StopReason::CycleLimit);
                    }
                }
            }
        }
    }
}

/// Log a one-line status every `every` until the task is aborted
pub async fn report_status(world: SharedWorld, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; skip it so the first line has news
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let state = world.read();
        let counts = state.population().archetype_counts();
        debug!(
            cycle = state.cycle(),
            organisms = state.population_len(),
            resource_count = state.resource_count(),
            resource_percent = format!("{:.1}", state.grid().resource_fraction() * 100.0),
            direct = counts.direct,
            steady = counts.steady,
            meandering = counts.meandering,
            circling = counts.circling,
            "World status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::SimulationConfig;

    fn runner_config(organisms: usize, max_cycles: Option<u64>) -> RunnerConfig {
        let mut simulation = SimulationConfig {
            seed: Some(99),
            ..Default::default()
        };
        simulation.world.width = 40;
        simulation.world.height = 30;
        simulation.world.initial_organism_count = organisms;

        RunnerConfig {
            simulation,
            tick_rate_hz: 1000,
            max_cycles,
            ..Default::default()
        }
    }

    fn driver(config: &RunnerConfig) -> Driver {
        let mut world = World::with_config(config.simulation.clone()).unwrap();
        world.initialize();
        Driver::new(world, config)
    }

    #[tokio::test]
    async fn test_stops_at_cycle_limit() {
        let config = runner_config(10, Some(25));
        let driver = driver(&config);

        let stop = driver.run(std::future::pending()).await.unwrap();

        assert_eq!(stop, StopReason::CycleLimit);
        assert_eq!(driver.world().read().cycle(), 25);
    }

    #[tokio::test]
    async fn test_stops_on_extinction() {
        let config = runner_config(0, Some(1000));
        let driver = driver(&config);

        let stop = driver.run(std::future::pending()).await.unwrap();

        assert_eq!(stop, StopReason::Extinct);
        assert_eq!(driver.world().read().cycle(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_wins_over_pending_tick() {
        let config = runner_config(10, None);
        let driver = driver(&config);

        let stop = driver.run(std::future::ready(())).await.unwrap();

        assert_eq!(stop, StopReason::Shutdown);
        assert!(!driver.world().read().has_run());
    }
}
