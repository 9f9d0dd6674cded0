//! End-of-run summary.

use crate::driver::StopReason;
use anyhow::{Context, Result};
use bugs_core::RunId;
use bugs_world::{HistoryEntry, RunTotals, World};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics exported when a run ends. Not a save file: it carries the
/// history window and totals, never the grid or the organisms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stop_reason: StopReason,
    pub cycles: u64,
    pub final_population: usize,
    pub final_resource_count: usize,
    pub totals: RunTotals,
    pub history: Vec<HistoryEntry>,
}

impl RunReport {
    pub fn new(
        run_id: RunId,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        stop_reason: StopReason,
        world: &World,
    ) -> Self {
        Self {
            run_id,
            started_at,
            finished_at,
            stop_reason,
            cycles: world.cycle(),
            final_population: world.population_len(),
            final_resource_count: world.resource_count(),
            totals: *world.totals(),
            history: world.history_snapshot(),
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugs_core::SimulationConfig;

    #[test]
    fn test_report_from_world() {
        let mut config = SimulationConfig {
            seed: Some(5),
            ..Default::default()
        };
        config.world.width = 30;
        config.world.height = 30;
        config.world.history_cadence = 10;
        let mut world = World::with_config(config).unwrap();
        world.initialize();
        world.run_for(50).unwrap();

        let started = Utc::now();
        let report = RunReport::new(RunId::new(), started, Utc::now(), StopReason::CycleLimit, &world);

        assert_eq!(report.cycles, world.cycle());
        assert_eq!(report.final_population, world.population_len());
        assert_eq!(report.history.len(), world.history().len());
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_write_json() {
        let mut world = World::new(10, 10).unwrap();
        world.initialize();
        world.step().unwrap();
        let report = RunReport::new(RunId::new(), Utc::now(), Utc::now(), StopReason::Shutdown, &world);

        let path = std::env::temp_dir().join(format!("bugs-report-{}.json", report.run_id));
        report.write_json(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: RunReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.run_id, report.run_id);
        assert_eq!(back.stop_reason, StopReason::Shutdown);
        assert_eq!(back.cycles, 1);
        assert!(raw.contains("\"stop_reason\": \"shutdown\""));

        std::fs::remove_file(&path).unwrap();
    }
}
