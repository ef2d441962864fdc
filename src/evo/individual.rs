//! A candidate solution: one genome plus its cached fitness.

use crate::error::EvoError;
use crate::genome::{BitString, Crossover, POLYGON_BITS};
use rand::Rng;

/// One member of a generation.
///
/// Fitness is unset until the individual has been evaluated; higher is
/// better, `1.0` is a perfect match with the target image. The genome is
/// only ever modified through this type's own operators, never by
/// external code reaching in.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: BitString,
    fitness: Option<f64>,
}

impl Individual {
    /// Seeds a random individual sized for `polygon_count` polygons.
    pub fn random<R: Rng>(polygon_count: usize, rng: &mut R) -> Self {
        Self {
            genome: BitString::random(POLYGON_BITS * polygon_count, rng),
            fitness: None,
        }
    }

    /// Wraps an existing genome, e.g. one produced by [`procreate`] or
    /// by the growth path. Fitness starts unset.
    ///
    /// [`procreate`]: Individual::procreate
    pub fn from_genome(genome: BitString) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// The genome bits.
    pub fn genome(&self) -> &BitString {
        &self.genome
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Stores an evaluation result.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Fitness or an [`EvoError::UnscoredPopulation`] carrying `index`.
    ///
    /// Selection and elitism require a fully scored population; hitting
    /// an unscored individual there is a programming error, not a state
    /// to recover from.
    pub fn scored_fitness(&self, index: usize) -> Result<f64, EvoError> {
        self.fitness
            .ok_or(EvoError::UnscoredPopulation { index })
    }

    /// Flips every genome bit independently with `probability` and
    /// drops the now-stale fitness.
    pub fn mutate<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        self.genome.mutate(probability, rng);
        self.fitness = None;
    }

    /// Produces a child genome by mating with `mate`.
    ///
    /// With probability `crossover_prob` the child is recombined from
    /// both parents using `method`; otherwise it starts as a copy of
    /// this individual's genome. The result is then mutated in place
    /// with per-bit probability `mutation_prob`.
    ///
    /// This is the single entry point the engine uses to produce
    /// offspring.
    pub fn procreate<R: Rng>(
        &self,
        mate: &Individual,
        crossover_prob: f64,
        mutation_prob: f64,
        method: Crossover,
        rng: &mut R,
    ) -> Result<BitString, EvoError> {
        let mut child = if rng.random::<f64>() < crossover_prob {
            method.recombine(&self.genome, &mate.genome, rng)?
        } else {
            self.genome.clone()
        };
        child.mutate(mutation_prob, rng);
        Ok(child)
    }
}

// ============================================================================
// Tests
// ============================================================================
