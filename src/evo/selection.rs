//! Parent selection strategies.
//!
//! Two interchangeable policies over a fully scored population. Which
//! strategy is active, and its selection size, are engine configuration
//! fixed for the whole run, not per-call parameters.
//!
//! Both strategies assume **maximization**: higher fitness is better.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection
//!   Schemes Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used
//!   in Evolutionary Algorithms"

use crate::error::EvoError;
use crate::evo::individual::Individual;
use rand::Rng;

/// Selection strategy for choosing parents. Closed set, dispatched by
/// `match` in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Repeated uniform draws keeping the running best by fitness.
    ///
    /// Moderate, scale-free selection pressure; the original default.
    #[default]
    Tournament,

    /// Fitness-proportionate selection into a mating pool.
    ///
    /// Each individual occupies an interval whose length equals its
    /// fitness; susceptible to super-individual dominance when fitness
    /// variance is high.
    Roulette,
}

/// Draws a mating pool of `rounds` indices by roulette wheel.
///
/// Builds cumulative intervals sized by fitness, then repeats `rounds`
/// independent draws (with replacement) of a uniform point in
/// `[0, total)`.
///
/// # Errors
///
/// [`EvoError::UnscoredPopulation`] if any individual has no fitness;
/// [`EvoError::DegenerateSelection`] when total fitness is zero — an
/// all-zero population gives no basis for proportional selection and
/// must be surfaced, not masked.
pub fn roulette<R: Rng>(
    population: &[Individual],
    rounds: usize,
    rng: &mut R,
) -> Result<Vec<usize>, EvoError> {
    let mut cumulative = Vec::with_capacity(population.len());
    let mut total = 0.0;
    for (i, ind) in population.iter().enumerate() {
        total += ind.scored_fitness(i)?;
        cumulative.push(total);
    }
    if total <= 0.0 {
        return Err(EvoError::DegenerateSelection);
    }

    let pool = (0..rounds)
        .map(|_| {
            let pointer = rng.random_range(0.0..total);
            // First interval whose cumulative end exceeds the pointer.
            cumulative
                .iter()
                .position(|&end| pointer < end)
                .unwrap_or(population.len() - 1)
        })
        .collect();
    Ok(pool)
}

/// Tournament selection: `size` uniform draws from the full population,
/// returning the index of the best by fitness. Ties keep the first-seen
/// contender.
///
/// # Errors
///
/// [`EvoError::UnscoredPopulation`] if a drawn individual has no
/// fitness.
pub fn tournament<R: Rng>(
    population: &[Individual],
    size: usize,
    rng: &mut R,
) -> Result<usize, EvoError> {
    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    let mut best_fit = population[best_idx].scored_fitness(best_idx)?;

    for _ in 1..size.max(1) {
        let idx = rng.random_range(0..n);
        let fit = population[idx].scored_fitness(idx)?;
        if fit > best_fit {
            best_idx = idx;
            best_fit = fit;
        }
    }
    Ok(best_idx)
}

// ============================================================================
// Tests
// ============================================================================
