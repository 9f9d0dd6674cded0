//! Leaky-bucket resource injection.

use crate::grid::Grid;
use bugs_core::{Cell, Position, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

/// Cost of one injected unit, in accumulator units
const UNIT_COST: i64 = 100;

/// What one scheduler tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReseedOutcome {
    pub injected: usize,
    /// Units owed but dropped because no empty cell was found
    pub skipped: usize,
}

/// Injects on average `rate / 100` resource units per cycle using integer
/// arithmetic only.
///
/// Each tick spends 100 from the accumulator per unit for as long as the
/// accumulator is non-negative, then adds `rate`. Small rates therefore
/// inject one unit every few cycles and rates above 100 inject in bursts.
#[derive(Debug, Clone)]
pub struct ReseedScheduler {
    accumulator: i64,
    rate: u32,
    max_attempts: usize,
}

impl ReseedScheduler {
    pub fn new(rate: u32, max_attempts: usize) -> Self {
        Self {
            accumulator: 0,
            rate,
            max_attempts,
        }
    }

    pub fn reset(&mut self, rate: u32) {
        self.accumulator = 0;
        self.rate = rate;
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    pub fn tick(&mut self, grid: &mut Grid, rng: &mut ChaCha8Rng) -> Result<ReseedOutcome> {
        let mut outcome = ReseedOutcome::default();

        while self.accumulator >= 0 {
            self.accumulator -= UNIT_COST;
            match self.find_absent_cell(grid, rng) {
                Some(pos) => {
                    grid.set(pos, Cell::Present)?;
                    outcome.injected += 1;
                }
                None => outcome.skipped += 1,
            }
        }
        self.accumulator += i64::from(self.rate);

        if outcome.skipped > 0 {
            warn!(
                skipped = outcome.skipped,
                resource_count = grid.resource_count(),
                "No empty cell found for reseeding"
            );
        }

        Ok(outcome)
    }

    fn find_absent_cell(&self, grid: &Grid, rng: &mut ChaCha8Rng) -> Option<Position> {
        if grid.is_empty() || grid.is_saturated() {
            return None;
        }

        for _ in 0..self.max_attempts {
            let pos = Position::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
            if let Ok(Cell::Absent) = grid.get(pos) {
                return Some(pos);
            }
        }

        None
    }
}
