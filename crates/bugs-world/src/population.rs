//! The live set of organisms and the per-cycle passes over it.

use crate::grid::Grid;
use crate::organism::Organism;
use bugs_core::{ArchetypeCounts, EnergyConfig, GeneticsConfig, Position, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Births and deaths from one lifecycle pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleSummary {
    pub reproductions: usize,
    pub births: usize,
    pub deaths: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Population {
    organisms: Vec<Organism>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the population with `count` fresh organisms at random cells
    pub fn seed(
        &mut self,
        count: usize,
        width: i32,
        height: i32,
        energy: &EnergyConfig,
        genetics: &GeneticsConfig,
        rng: &mut ChaCha8Rng,
    ) {
        self.organisms.clear();
        self.organisms.reserve(count);
        for _ in 0..count {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            self.organisms
                .push(Organism::spawn(Position::new(x, y), energy, genetics, rng));
        }
    }

    pub fn push(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    /// Reproduction and death, evaluated before anyone moves.
    ///
    /// A parent that qualifies is replaced in place by a `+1` and a `-1`
    /// mutant; everyone else survives only with positive energy.
    pub fn lifecycle_pass(&mut self, config: &EnergyConfig, rng: &mut ChaCha8Rng) -> LifecycleSummary {
        let mut summary = LifecycleSummary::default();
        let mut next_generation = Vec::with_capacity(self.organisms.len() + 8);

        for organism in self.organisms.drain(..) {
            if organism.can_reproduce(config) {
                let up = organism.offspring(1, rng);
                let down = organism.offspring(-1, rng);
                trace!(
                    parent_age = organism.age,
                    parent_energy = organism.energy,
                    position_x = organism.position.x,
                    position_y = organism.position.y,
                    "Organism reproduced"
                );
                next_generation.push(up);
                next_generation.push(down);
                summary.reproductions += 1;
                summary.births += 2;
            } else if organism.is_alive() {
                next_generation.push(organism);
            } else {
                summary.deaths += 1;
            }
        }

        self.organisms = next_generation;
        summary
    }

    /// Move every organism, then let it eat the 3x3 window around its new
    /// cell. Returns the number of resource units eaten.
    pub fn movement_pass(
        &mut self,
        grid: &mut Grid,
        config: &EnergyConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<usize> {
        let (width, height) = (grid.width, grid.height);
        let mut eaten = 0;

        for organism in &mut self.organisms {
            organism.advance(width, height, config.metabolic_cost, rng);
            let units = graze(grid, organism.position)?;
            organism.feed(units, config);
            eaten += units;
        }

        Ok(eaten)
    }

    pub fn archetype_counts(&self) -> ArchetypeCounts {
        self.organisms.iter().map(Organism::archetype).collect()
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> + '_ {
        self.organisms.iter()
    }
}

/// Clear the 3x3 window centred on `center`, wrapping at the edges
fn graze(grid: &mut Grid, center: Position) -> Result<usize> {
    let mut units = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let pos = center.add(dx, dy).wrap(grid.width, grid.height);
            if grid.take(pos)? {
                units += 1;
            }
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Genome, GENE_COUNT};
    use bugs_core::{Cell, Heading};
    use rand::SeedableRng;

    fn organism(x: i32, y: i32, energy: i32, age: u64) -> Organism {
        let mut organism = Organism::new(
            Position::new(x, y),
            energy,
            Heading::South,
            Genome::from_values([0; GENE_COUNT]),
        );
        organism.age = age;
        organism
    }

    #[test]
    fn test_seed_places_organisms_on_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut population = Population::new();
        population.seed(
            50,
            30,
            20,
            &EnergyConfig::default(),
            &GeneticsConfig::default(),
            &mut rng,
        );

        assert_eq!(population.len(), 50);
        for organism in population.iter() {
            assert!(organism.position.x >= 0 && organism.position.x < 30);
            assert!(organism.position.y >= 0 && organism.position.y < 20);
            assert_eq!(organism.energy, 400);
        }
        assert_eq!(population.archetype_counts().total(), 50);
    }

    #[test]
    fn test_lifecycle_reproduction() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut population = Population::new();
        population.push(organism(4, 4, 1300, 801));

        let summary = population.lifecycle_pass(&EnergyConfig::default(), &mut rng);

        assert_eq!(summary.reproductions, 1);
        assert_eq!(summary.births, 2);
        assert_eq!(population.len(), 2);
        for child in population.iter() {
            assert_eq!(child.age, 0);
            assert_eq!(child.energy, 650);
            assert_eq!(child.position, Position::new(4, 4));
        }
        // The parent is gone: nobody left with the parent's age
        assert!(population.iter().all(|o| o.age != 801));

        let deltas: Vec<i32> = population
            .iter()
            .map(|o| o.genome.values().iter().sum())
            .collect();
        assert_eq!(deltas, vec![1, -1]);
    }

    #[test]
    fn test_lifecycle_death() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut population = Population::new();
        population.push(organism(0, 0, 0, 10));
        population.push(organism(1, 1, -3, 10));
        population.push(organism(2, 2, 1, 10));
        // Old but too poor to reproduce, still alive
        population.push(organism(3, 3, 1000, 900));

        let summary = population.lifecycle_pass(&EnergyConfig::default(), &mut rng);

        assert_eq!(summary.deaths, 2);
        assert_eq!(summary.births, 0);
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_movement_pass_feeds_from_wrapped_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut grid = Grid::new(10, 10);
        // South mover from (0, 7) lands on (0, 9); its window spans
        // columns 9, 0, 1 and rows 8, 9, 0.
        for pos in [
            Position::new(9, 8),
            Position::new(0, 0),
            Position::new(1, 9),
            Position::new(9, 0),
            Position::new(5, 5),
        ] {
            grid.set(pos, Cell::Present).unwrap();
        }

        let mut population = Population::new();
        population.push(organism(0, 7, 100, 0));

        let eaten = population
            .movement_pass(&mut grid, &EnergyConfig::default(), &mut rng)
            .unwrap();

        assert_eq!(eaten, 4);
        assert_eq!(grid.resource_count(), 1);
        assert_eq!(grid.get(Position::new(5, 5)).unwrap(), Cell::Present);

        let moved = population.iter().next().unwrap();
        assert_eq!(moved.position, Position::new(0, 9));
        assert_eq!(moved.energy, 100 - 1 + 4 * 40);
    }

    #[test]
    fn test_energy_bounds_after_pass() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut grid = Grid::new(40, 40);
        grid.seed(60, &mut rng);

        let mut population = Population::new();
        population.seed(
            30,
            40,
            40,
            &EnergyConfig::default(),
            &GeneticsConfig::default(),
            &mut rng,
        );
        let config = EnergyConfig::default();

        for _ in 0..50 {
            population.lifecycle_pass(&config, &mut rng);
            population.movement_pass(&mut grid, &config, &mut rng).unwrap();
            for organism in population.iter() {
                assert!(organism.energy <= config.max_energy);
            }
        }
        population.lifecycle_pass(&config, &mut rng);
        assert!(population.iter().all(|o| o.energy > 0));
    }
}
