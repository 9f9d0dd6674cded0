//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Chance, in whole percent, that a cell starts with resource
    pub initial_resource_percent: u32,
    /// Number of organisms placed at initialization
    pub initial_organism_count: usize,
    /// Resource injected per cycle, in hundredths of a cell
    pub reseed_rate: u32,
    /// Cycles between history snapshots
    pub history_cadence: u64,
    /// Random probes before giving up on finding an empty cell to reseed
    pub max_reseed_attempts: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            initial_resource_percent: 3,
            initial_organism_count: 20,
            reseed_rate: 10,
            history_cadence: 20,
            max_reseed_attempts: 1000,
        }
    }
}

/// Energy economy of an organism
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Starting energy for freshly seeded organisms
    pub initial_energy: i32,
    /// Energy ceiling applied after feeding
    pub max_energy: i32,
    /// Energy gained per resource cell eaten
    pub energy_per_resource: i32,
    /// Energy spent per move
    pub metabolic_cost: i32,
    /// Organisms older than this may reproduce
    pub reproduce_min_age: u64,
    /// Organisms with more energy than this may reproduce
    pub reproduce_min_energy: i32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial_energy: 400,
            max_energy: 1500,
            energy_per_resource: 40,
            metabolic_cost: 1,
            reproduce_min_age: 800,
            reproduce_min_energy: 1000,
        }
    }
}

/// Gene value range for freshly seeded genomes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    pub initial_gene_min: i32,
    pub initial_gene_max: i32,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            initial_gene_min: -2,
            initial_gene_max: 1,
        }
    }
}

/// Everything the engine needs to build and run a world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility; entropy when absent
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub genetics: GeneticsConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.width <= 0 || world.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                world.width, world.height
            )));
        }
        if world.width.checked_mul(world.height).is_none() {
            return Err(Error::InvalidConfig(format!(
                "grid of {}x{} cells is too large",
                world.width, world.height
            )));
        }
        if world.initial_resource_percent > 100 {
            return Err(Error::InvalidConfig(format!(
                "initial resource percent must be within 0..=100, got {}",
                world.initial_resource_percent
            )));
        }
        if world.history_cadence == 0 {
            return Err(Error::InvalidConfig(
                "history cadence must be at least one cycle".to_string(),
            ));
        }
        if world.max_reseed_attempts == 0 {
            return Err(Error::InvalidConfig(
                "reseed attempt budget must be at least one".to_string(),
            ));
        }
        if self.genetics.initial_gene_min > self.genetics.initial_gene_max {
            return Err(Error::InvalidConfig(format!(
                "initial gene range {}..={} is empty",
                self.genetics.initial_gene_min, self.genetics.initial_gene_max
            )));
        }
        if self.energy.max_energy <= 0 {
            return Err(Error::InvalidConfig(
                "energy ceiling must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub simulation: SimulationConfig,
    /// Steps per second
    pub tick_rate_hz: u32,
    /// Stop after this many cycles even if the population survives
    pub max_cycles: Option<u64>,
    /// Seconds between status log lines
    pub status_interval_secs: u64,
    /// Where to write the end-of-run JSON report
    pub report_path: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            tick_rate_hz: 60,
            max_cycles: None,
            status_interval_secs: 5,
            report_path: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(Error::InvalidConfig(
                "tick rate must be at least 1 Hz".to_string(),
            ));
        }
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.width, 600);
        assert_eq!(world_config.height, 600);
        assert_eq!(world_config.reseed_rate, 10);

        let energy_config = EnergyConfig::default();
        assert_eq!(energy_config.initial_energy, 400);
        assert_eq!(energy_config.max_energy, 1500);

        let runner_config = RunnerConfig::default();
        assert_eq!(runner_config.tick_rate_hz, 60);
        assert!(runner_config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "simulation": { "seed": 7, "world": { "width": 50, "height": 40 } }, "max_cycles": 100 }"#;
        let config: RunnerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.world.width, 50);
        assert_eq!(config.simulation.world.height, 40);
        assert_eq!(config.simulation.world.initial_organism_count, 20);
        assert_eq!(config.simulation.energy.reproduce_min_age, 800);
        assert_eq!(config.max_cycles, Some(100));
        assert_eq!(config.tick_rate_hz, 60);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.world.width = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SimulationConfig::default();
        config.world.width = 70_000;
        config.world.height = 70_000;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SimulationConfig::default();
        config.world.initial_resource_percent = 101;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SimulationConfig::default();
        config.world.history_cadence = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SimulationConfig::default();
        config.genetics.initial_gene_min = 3;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let runner = RunnerConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert!(matches!(runner.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let result = RunnerConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
