//! Flat resource grid.

use bugs_core::{Cell, Error, Position, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Row-major field of resource cells.
///
/// The grid does no wrapping of its own: callers hand it coordinates that
/// are already inside `[0, width) x [0, height)`, anything else is reported
/// as [`Error::OutOfRange`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
    resource_count: usize,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Absent; size],
            resource_count: 0,
        }
    }

    /// Reset every cell, then mark each present with `percent`% probability
    pub fn seed(&mut self, percent: u32, rng: &mut ChaCha8Rng) {
        self.resource_count = 0;
        for cell in &mut self.cells {
            if rng.gen_range(0..100) < percent {
                *cell = Cell::Present;
                self.resource_count += 1;
            } else {
                *cell = Cell::Absent;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Absent);
        self.resource_count = 0;
    }

    pub fn get(&self, pos: Position) -> Result<Cell> {
        let index = self.pos_to_index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let index = self.pos_to_index(pos)?;
        match (self.cells[index], cell) {
            (Cell::Absent, Cell::Present) => self.resource_count += 1,
            (Cell::Present, Cell::Absent) => self.resource_count -= 1,
            _ => {}
        }
        self.cells[index] = cell;
        Ok(())
    }

    /// Clear a cell, reporting whether it held resource
    pub fn take(&mut self, pos: Position) -> Result<bool> {
        let present = self.get(pos)?.is_present();
        if present {
            self.set(pos, Cell::Absent)?;
        }
        Ok(present)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    pub fn resource_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.resource_count as f64 / self.cells.len() as f64
    }

    pub fn is_saturated(&self) -> bool {
        self.resource_count == self.cells.len()
    }

    fn pos_to_index(&self, pos: Position) -> Result<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return Err(Error::OutOfRange {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Positions currently holding resource
    pub fn resource_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_present())
            .map(|(pos, _)| pos)
    }
}
