//! Periodic population and resource statistics.

use crate::grid::Grid;
use crate::population::Population;
use bugs_core::ArchetypeCounts;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Statistics snapshot for one recorded cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub cycle: u64,
    pub resource_count: usize,
    /// Resource cells over total cells, 0.0 to 1.0
    pub resource_fraction: f64,
    pub organism_count: usize,
    pub archetypes: ArchetypeCounts,
}

impl HistoryEntry {
    pub fn capture(cycle: u64, grid: &Grid, population: &Population) -> Self {
        Self {
            cycle,
            resource_count: grid.resource_count(),
            resource_fraction: grid.resource_fraction(),
            organism_count: population.len(),
            archetypes: population.archetype_counts(),
        }
    }
}

/// Sliding window of snapshots taken every `cadence` cycles.
///
/// Capacity is the grid width so a chart gets one point per pixel column.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    cadence: u64,
}

impl History {
    pub fn new(capacity: usize, cadence: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cadence,
        }
    }

    pub fn is_due(&self, cycle: u64) -> bool {
        self.cadence > 0 && cycle % self.cadence == 0
    }

    /// Capture a snapshot and drop whatever no longer fits the window
    pub fn record(&mut self, cycle: u64, grid: &Grid, population: &Population) {
        self.push(HistoryEntry::capture(cycle, grid, population));
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cadence(&self) -> u64 {
        self.cadence
    }

    pub fn reset(&mut self, capacity: usize, cadence: u64) {
        self.entries.clear();
        self.capacity = capacity;
        self.cadence = cadence;
    }
}
