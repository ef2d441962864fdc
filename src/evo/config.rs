//! Engine configuration.
//!
//! [`EvoConfig`] holds all parameters that control the evolutionary
//! loop. Defaults match the reference run; the builder methods allow
//! piecewise overrides.

use crate::error::EvoError;
use crate::evo::selection::Selection;
use crate::genome::Crossover;

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use polyvolve::evo::EvoConfig;
///
/// let config = EvoConfig::default();
/// assert_eq!(config.generation_size, 70);
/// assert_eq!(config.elitism_size, 2);
/// ```
///
/// # Builder pattern
///
/// ```
/// use polyvolve::evo::{EvoConfig, Selection};
/// use polyvolve::genome::Crossover;
///
/// let config = EvoConfig::default()
///     .with_selection(Selection::Roulette, 30)
///     .with_crossover(Crossover::TwoPoint)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct EvoConfig {
    /// Number of individuals in every generation.
    pub generation_size: usize,

    /// Selection pressure: tournament draw count, or the roulette
    /// mating-pool size, depending on `selection`.
    pub selection_size: usize,

    /// Individuals carried over unchanged each generation.
    pub elitism_size: usize,

    /// Selection strategy, fixed for the whole run.
    pub selection: Selection,

    /// Crossover variant used by reproduction.
    pub crossover: Crossover,

    /// Probability of applying crossover when producing a child; when
    /// skipped the child starts as a copy of the first parent.
    pub crossover_prob: f64,

    /// Generations between report records.
    pub report_every: u64,

    /// Generations between snapshot artifacts. Slower cadence than
    /// reporting.
    pub save_every: u64,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvoConfig {
    fn default() -> Self {
        Self {
            generation_size: 70,
            selection_size: 3,
            elitism_size: 2,
            selection: Selection::Tournament,
            crossover: Crossover::Uniform,
            crossover_prob: 0.95,
            report_every: 10,
            save_every: 200,
            parallel: true,
            seed: None,
        }
    }
}

impl EvoConfig {
    /// Preset using roulette-wheel selection with the reference
    /// mating-pool size of 30.
    pub fn roulette() -> Self {
        Self::default().with_selection(Selection::Roulette, 30)
    }

    /// Sets the generation size.
    pub fn with_generation_size(mut self, n: usize) -> Self {
        self.generation_size = n;
        self
    }

    /// Sets the selection strategy and its selection size.
    pub fn with_selection(mut self, selection: Selection, size: usize) -> Self {
        self.selection = selection;
        self.selection_size = size;
        self
    }

    /// Sets the elitism size.
    pub fn with_elitism_size(mut self, n: usize) -> Self {
        self.elitism_size = n;
        self
    }

    /// Sets the crossover variant.
    pub fn with_crossover(mut self, method: Crossover) -> Self {
        self.crossover = method;
        self
    }

    /// Sets the crossover probability, clamped to `[0, 1]`.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the reporting cadence in generations.
    pub fn with_report_every(mut self, n: u64) -> Self {
        self.report_every = n;
        self
    }

    /// Sets the snapshot cadence in generations.
    pub fn with_save_every(mut self, n: u64) -> Self {
        self.save_every = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The population arithmetic requires
    /// `generation > selection > elitism > 0`; violations are fatal at
    /// engine construction.
    pub fn validate(&self) -> Result<(), EvoError> {
        if self.elitism_size == 0 {
            return Err(EvoError::InvalidConfiguration(
                "elitism_size must be positive".into(),
            ));
        }
        if self.selection_size <= self.elitism_size {
            return Err(EvoError::InvalidConfiguration(format!(
                "selection_size ({}) must exceed elitism_size ({})",
                self.selection_size, self.elitism_size
            )));
        }
        if self.generation_size <= self.selection_size {
            return Err(EvoError::InvalidConfiguration(format!(
                "generation_size ({}) must exceed selection_size ({})",
                self.generation_size, self.selection_size
            )));
        }
        if self.report_every == 0 || self.save_every == 0 {
            return Err(EvoError::InvalidConfiguration(
                "report_every and save_every must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvoConfig::default();
        assert_eq!(config.generation_size, 70);
        assert_eq!(config.selection_size, 3);
        assert_eq!(config.elitism_size, 2);
        assert_eq!(config.selection, Selection::Tournament);
        assert_eq!(config.crossover, Crossover::Uniform);
        assert!((config.crossover_prob - 0.95).abs() < 1e-12);
        assert_eq!(config.report_every, 10);
        assert_eq!(config.save_every, 200);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_roulette_preset() {
        let config = EvoConfig::roulette();
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.selection_size, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvoConfig::default()
            .with_generation_size(100)
            .with_selection(Selection::Roulette, 40)
            .with_elitism_size(5)
            .with_crossover(Crossover::OnePoint)
            .with_crossover_prob(0.8)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.generation_size, 100);
        assert_eq!(config.selection_size, 40);
        assert_eq!(config.elitism_size, 5);
        assert_eq!(config.crossover, Crossover::OnePoint);
        assert!((config.crossover_prob - 0.8).abs() < 1e-12);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_elitism() {
        let config = EvoConfig::default().with_elitism_size(0);
        assert!(matches!(
            config.validate(),
            Err(EvoError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_selection_not_above_elitism() {
        let config = EvoConfig::default().with_elitism_size(3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_generation_not_above_selection() {
        let config = EvoConfig::default().with_generation_size(3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_crossover_prob_clamped() {
        let config = EvoConfig::default().with_crossover_prob(1.5);
        assert!((config.crossover_prob - 1.0).abs() < 1e-12);
    }
}
