//! The world: grid, population, reseeding and history behind one `step()`.

use crate::grid::Grid;
use crate::history::{History, HistoryEntry};
use crate::organism::OrganismSnapshot;
use crate::population::{LifecycleSummary, Population};
use crate::reseed::{ReseedOutcome, ReseedScheduler};
use bugs_core::{Cell, Error, Position, Result, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Continue,
    /// No organisms left. A normal end of run, not a failure.
    Extinct,
}

/// What happened during the most recent step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub reseed: ReseedOutcome,
    pub lifecycle: LifecycleSummary,
    pub eaten: usize,
}

/// Running totals since the last `initialize()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub injected: u64,
    pub eaten: u64,
    pub births: u64,
    pub deaths: u64,
    pub reproductions: u64,
}

impl RunTotals {
    fn absorb(&mut self, stats: &StepStats) {
        self.injected += stats.reseed.injected as u64;
        self.eaten += stats.eaten as u64;
        self.births += stats.lifecycle.births as u64;
        self.deaths += stats.lifecycle.deaths as u64;
        self.reproductions += stats.lifecycle.reproductions as u64;
    }
}

/// Owns all simulation state. `step()` is the only mutator; everything
/// else reads.
///
/// Per cycle: record history if on cadence (so entries describe the state
/// the cycle started from), reseed, reproduce/kill, then move and feed.
pub struct World {
    config: SimulationConfig,
    grid: Grid,
    population: Population,
    reseed: ReseedScheduler,
    history: History,
    rng: ChaCha8Rng,
    cycle: u64,
    last_step: StepStats,
    totals: RunTotals,
}

impl World {
    /// A world of the given size with default settings. Call
    /// [`World::initialize`] before stepping.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let mut config = SimulationConfig::default();
        config.world.width = width;
        config.world.height = height;
        Self::with_config(config)
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let world = &config.world;

        Ok(Self {
            grid: Grid::new(world.width, world.height),
            population: Population::new(),
            reseed: ReseedScheduler::new(world.reseed_rate, world.max_reseed_attempts),
            history: History::new(world.width as usize, world.history_cadence),
            rng,
            cycle: 0,
            last_step: StepStats::default(),
            totals: RunTotals::default(),
            config,
        })
    }

    /// Takes effect at the next `initialize()`
    pub fn set_initial_resource_percent(&mut self, percent: u32) -> Result<()> {
        if percent > 100 {
            return Err(Error::InvalidConfig(format!(
                "initial resource percent must be within 0..=100, got {percent}"
            )));
        }
        self.config.world.initial_resource_percent = percent;
        Ok(())
    }

    /// Takes effect at the next `initialize()`
    pub fn set_initial_organism_count(&mut self, count: usize) {
        self.config.world.initial_organism_count = count;
    }

    /// Takes effect at the next `initialize()`
    pub fn set_reseed_rate(&mut self, rate: u32) {
        self.config.world.reseed_rate = rate;
    }

    /// Reset cycle counter, grid, population, reseed accumulator and
    /// history to a fresh start state.
    pub fn initialize(&mut self) {
        let world = &self.config.world;

        self.cycle = 0;
        self.last_step = StepStats::default();
        self.totals = RunTotals::default();
        self.grid.seed(world.initial_resource_percent, &mut self.rng);
        self.population.seed(
            world.initial_organism_count,
            world.width,
            world.height,
            &self.config.energy,
            &self.config.genetics,
            &mut self.rng,
        );
        self.reseed.reset(world.reseed_rate);
        self.history.reset(world.width as usize, world.history_cadence);

        info!(
            width = world.width,
            height = world.height,
            resource_count = self.grid.resource_count(),
            organisms = self.population.len(),
            reseed_rate = world.reseed_rate,
            "World initialized"
        );
    }

    /// Advance one cycle
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.cycle += 1;

        if self.history.is_due(self.cycle) {
            self.history.record(self.cycle, &self.grid, &self.population);
            if let Some(entry) = self.history.latest() {
                debug!(
                    cycle = entry.cycle,
                    resource_count = entry.resource_count,
                    organisms = entry.organism_count,
                    direct = entry.archetypes.direct,
                    steady = entry.archetypes.steady,
                    meandering = entry.archetypes.meandering,
                    circling = entry.archetypes.circling,
                    "History snapshot recorded"
                );
            }
        }

        let reseed = self.reseed.tick(&mut self.grid, &mut self.rng)?;
        let lifecycle = self
            .population
            .lifecycle_pass(&self.config.energy, &mut self.rng);
        let eaten = self
            .population
            .movement_pass(&mut self.grid, &self.config.energy, &mut self.rng)?;

        self.last_step = StepStats {
            reseed,
            lifecycle,
            eaten,
        };
        self.totals.absorb(&self.last_step);

        trace!(
            cycle = self.cycle,
            injected = reseed.injected,
            births = lifecycle.births,
            deaths = lifecycle.deaths,
            eaten = eaten,
            organisms = self.population.len(),
            "Step complete"
        );

        if self.population.is_empty() {
            info!(
                cycle = self.cycle,
                deaths = self.totals.deaths,
                births = self.totals.births,
                "Population extinct"
            );
            return Ok(StepOutcome::Extinct);
        }

        Ok(StepOutcome::Continue)
    }

    /// Step up to `max_cycles` times, stopping early on extinction
    #[instrument(skip(self), fields(start_cycle = self.cycle))]
    pub fn run_for(&mut self, max_cycles: u64) -> Result<StepOutcome> {
        for _ in 0..max_cycles {
            if self.step()? == StepOutcome::Extinct {
                return Ok(StepOutcome::Extinct);
            }
        }
        Ok(StepOutcome::Continue)
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether any step has run since the last `initialize()`
    pub fn has_run(&self) -> bool {
        self.cycle != 0
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn cell(&self, x: i32, y: i32) -> Result<Cell> {
        self.grid.get(Position::new(x, y))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn resource_count(&self) -> usize {
        self.grid.resource_count()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_len(&self) -> usize {
        self.population.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    pub fn organisms(&self) -> impl Iterator<Item = OrganismSnapshot> + '_ {
        self.population.iter().map(OrganismSnapshot::from)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.snapshot()
    }

    pub fn last_step(&self) -> &StepStats {
        &self.last_step
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }
}
