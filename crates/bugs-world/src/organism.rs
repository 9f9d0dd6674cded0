//! Organism state and movement.

use crate::genome::{Genome, GENE_COUNT};
use bugs_core::{Archetype, EnergyConfig, GeneticsConfig, Heading, Position};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A bug in the simulation
#[derive(Debug, Clone)]
pub struct Organism {
    pub position: Position,
    pub energy: i32,
    pub age: u64,
    pub heading: Heading,
    pub genome: Genome,
}

impl Organism {
    pub fn new(position: Position, energy: i32, heading: Heading, genome: Genome) -> Self {
        Self {
            position,
            energy,
            age: 0,
            heading,
            genome,
        }
    }

    /// A fresh organism with a random heading and genome
    pub fn spawn(
        position: Position,
        energy: &EnergyConfig,
        genetics: &GeneticsConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let heading = Heading::from_index(rng.gen_range(0..Heading::COUNT));
        let genome = Genome::random(genetics, rng);
        Self::new(position, energy.initial_energy, heading, genome)
    }

    /// Offspring inherit position, heading and genome, take half the
    /// parent's energy and carry one mutation of `delta`.
    pub fn offspring(&self, delta: i32, rng: &mut ChaCha8Rng) -> Self {
        let mut genome = self.genome.clone();
        genome.mutate(delta, rng);
        Self::new(self.position, self.energy / 2, self.heading, genome)
    }

    pub fn archetype(&self) -> Archetype {
        self.genome.archetype()
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    pub fn can_reproduce(&self, config: &EnergyConfig) -> bool {
        self.age > config.reproduce_min_age && self.energy > config.reproduce_min_energy
    }

    /// Turn, step one lattice move and wrap onto the torus, then age and
    /// pay the metabolic cost.
    pub fn advance(&mut self, width: i32, height: i32, metabolic_cost: i32, rng: &mut ChaCha8Rng) {
        let turn = self.genome.select_turn(rng);
        self.heading = self.heading.turn(turn);

        let (dx, dy) = self.heading.to_delta();
        self.position = self.position.add(dx, dy).wrap(width, height);

        self.age += 1;
        self.energy -= metabolic_cost;
    }

    /// Credit eaten resource units, capped at the energy ceiling
    pub fn feed(&mut self, units: usize, config: &EnergyConfig) {
        let gained = units as i32 * config.energy_per_resource;
        self.energy = (self.energy + gained).min(config.max_energy);
    }

    pub fn snapshot(&self) -> OrganismSnapshot {
        OrganismSnapshot::from(self)
    }
}

/// Read-only copy of an organism for renderers and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismSnapshot {
    pub position: Position,
    pub heading: Heading,
    pub energy: i32,
    pub age: u64,
    pub archetype: Archetype,
    pub genes: [i32; GENE_COUNT],
}

impl From<&Organism> for OrganismSnapshot {
    fn from(org: &Organism) -> Self {
        Self {
            position: org.position,
            heading: org.heading,
            energy: org.energy,
            age: org.age,
            archetype: org.archetype(),
            genes: *org.genome.values(),
        }
    }
}
