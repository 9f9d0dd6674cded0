//! Heritable turn propensities.

use bugs_core::{Archetype, GeneticsConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub const GENE_COUNT: usize = 6;

/// Six signed genes, one per turn offset. Gene `i` weights a turn of `i`
/// lattice steps by `value[i]^2`; gene 0 is "keep going straight".
///
/// Weights, their total and the archetype are recomputed whenever the gene
/// values change, so they can never disagree with the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    values: [i32; GENE_COUNT],
    weights: [u64; GENE_COUNT],
    total_weight: u64,
    archetype: Archetype,
}

impl Genome {
    pub fn from_values(values: [i32; GENE_COUNT]) -> Self {
        let mut genome = Self {
            values,
            weights: [0; GENE_COUNT],
            total_weight: 0,
            archetype: Archetype::Circling,
        };
        genome.recompute();
        genome
    }

    /// Draw every gene uniformly from the configured initial range
    pub fn random(config: &GeneticsConfig, rng: &mut ChaCha8Rng) -> Self {
        let mut values = [0; GENE_COUNT];
        for value in &mut values {
            *value = rng.gen_range(config.initial_gene_min..=config.initial_gene_max);
        }
        Self::from_values(values)
    }

    /// Add `delta` to one uniformly chosen gene. Returns the gene index.
    pub fn mutate(&mut self, delta: i32, rng: &mut ChaCha8Rng) -> usize {
        let index = rng.gen_range(0..GENE_COUNT);
        self.values[index] += delta;
        self.recompute();
        index
    }

    /// Pick a turn offset in `0..6`.
    ///
    /// The draw is compared against each gene's own weight in index order,
    /// not against a running sum, and falls through to 5. This is not a
    /// proportional pick and must not be turned into one.
    pub fn select_turn(&self, rng: &mut ChaCha8Rng) -> usize {
        let draw = rng.gen_range(0..self.total_weight);
        for (turn, weight) in self.weights.iter().enumerate() {
            if draw < *weight {
                return turn;
            }
        }
        GENE_COUNT - 1
    }

    pub fn values(&self) -> &[i32; GENE_COUNT] {
        &self.values
    }

    pub fn weights(&self) -> &[u64; GENE_COUNT] {
        &self.weights
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// An all-zero genome has nothing to select on; it is treated as a
    /// pure forward mover (gene 0 weight 1).
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    fn recompute(&mut self) {
        for (weight, value) in self.weights.iter_mut().zip(self.values.iter()) {
            let magnitude = value.unsigned_abs() as u64;
            *weight = magnitude * magnitude;
        }
        self.total_weight = self.weights.iter().sum();
        if self.total_weight == 0 {
            self.weights[0] = 1;
            self.total_weight = 1;
        }
        self.archetype = Archetype::classify(self.weights[0], self.total_weight);
    }
}
