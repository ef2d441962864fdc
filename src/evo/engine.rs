//! The per-generation evolutionary loop.
//!
//! [`Evolution`] orchestrates one generation step: evaluate, select,
//! reproduce, apply elitism, advance the complexity scheduler, and
//! track the best-ever individual. When the scheduler grows the polygon
//! count, the step takes the growth path instead of reproducing: the
//! whole population is rebuilt at the larger genome length from the
//! elite set plus the scheduler's random padding, extending the search
//! dimensionality without losing accumulated fitness information.
//!
//! The engine is owned by the run's top-level driver and advanced by
//! explicit [`step`](Evolution::step) calls; it holds no global state
//! and no locks across generations.

use crate::error::EvoError;
use crate::evo::config::EvoConfig;
use crate::evo::individual::Individual;
use crate::evo::scheduler::SizeScheduler;
use crate::evo::selection::{self, Selection};
use crate::fitness::Evaluator;
use crate::genome;
use crate::random::seeded_rng;
use crate::report::{ReportRecord, ReportSink, SnapshotSink};
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Summary of one completed generation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Generation counter after this step.
    pub generation: u64,
    /// Scheduler's polygon count after this step.
    pub complexity: usize,
    /// Best fitness seen in the run so far.
    pub best_fitness: f64,
    /// Whether this step took the growth path.
    pub grew: bool,
}

/// The evolution engine.
///
/// Constructed once per run with its evaluator and sinks, then stepped
/// by the driver until stopped. The population invariant — exactly
/// `generation_size` individuals whose genome length equals
/// `POLYGON_BITS * scheduler.current()` — holds whenever `step`
/// returns.
pub struct Evolution<E> {
    config: EvoConfig,
    scheduler: SizeScheduler,
    evaluator: E,
    report: Box<dyn ReportSink>,
    snapshot: Box<dyn SnapshotSink>,
    generation: Vec<Individual>,
    best: Option<Individual>,
    count: u64,
    rng: StdRng,
    debug_sync: bool,
}

impl<E: Evaluator> Evolution<E> {
    /// Builds an engine and seeds a random initial population sized to
    /// the scheduler's starting complexity.
    ///
    /// # Errors
    ///
    /// [`EvoError::InvalidConfiguration`] when the population
    /// arithmetic is inconsistent; fatal at startup.
    pub fn new(
        config: EvoConfig,
        scheduler: SizeScheduler,
        evaluator: E,
        report: Box<dyn ReportSink>,
        snapshot: Box<dyn SnapshotSink>,
    ) -> Result<Self, EvoError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => seeded_rng(seed),
            None => seeded_rng(rand::random()),
        };
        let generation: Vec<Individual> = (0..config.generation_size)
            .map(|_| Individual::random(scheduler.start(), &mut rng))
            .collect();

        log::info!("Generation size: {}", config.generation_size);
        log::info!("Selection pressure: {}", config.selection_size);
        log::info!("Elitism size: {}", config.elitism_size);
        log::info!("Selection type: {:?}", config.selection);
        log::info!("Crossover type: {:?}", config.crossover);
        log::info!("Crossover probability: {}", config.crossover_prob);

        Ok(Self {
            config,
            scheduler,
            evaluator,
            report,
            snapshot,
            generation,
            best: None,
            count: 0,
            rng,
            debug_sync: false,
        })
    }

    /// Generation counter (number of completed steps).
    pub fn generation_count(&self) -> u64 {
        self.count
    }

    /// Current population. Size is always `generation_size`.
    pub fn population(&self) -> &[Individual] {
        &self.generation
    }

    /// Best-ever individual, `None` before the first step.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Scheduler state (current complexity, mutation probability).
    pub fn scheduler(&self) -> &SizeScheduler {
        &self.scheduler
    }

    /// Toggles debug evaluation logging and returns the new state.
    ///
    /// When enabled, every step logs its evaluation wall time so the
    /// cost of each fitness pass is visible while tuning.
    pub fn toggle_debug_sync(&mut self) -> bool {
        self.debug_sync = !self.debug_sync;
        self.debug_sync
    }

    /// Runs one generation step.
    ///
    /// The very first step begins by evaluating the seeded population.
    /// Afterwards the scheduler decides the path: a growth step rebuilds
    /// every genome at the new length from the elite set, a normal step
    /// reproduces via selection, crossover, and mutation with the elite
    /// carried over unchanged. Either way the step ends with the best
    /// individual re-recorded and, on cadence, a report record and a
    /// snapshot artifact.
    pub fn step(&mut self) -> Result<StepReport, EvoError> {
        let step_start = Instant::now();
        if self.count == 0 {
            self.evaluate_generation()?;
        }

        self.count += 1;
        let counter = self.count;
        self.scheduler.increase(counter, &mut self.rng);

        let grew = self.scheduler.changed();
        if grew {
            self.upgrade_generation()?;
        } else {
            self.next_generation()?;
        }
        debug_assert_eq!(self.generation.len(), self.config.generation_size);

        self.remember_fittest()?;
        let best_fitness = self
            .best
            .as_ref()
            .and_then(Individual::fitness)
            .expect("best is recorded after every step");

        if self.debug_sync {
            log::debug!(
                "generation {counter}: step took {:.3}s",
                step_start.elapsed().as_secs_f64()
            );
        }

        if counter % self.config.report_every == 0 {
            self.report.report(&ReportRecord {
                complexity: self.scheduler.current(),
                generation: counter,
                best_fitness,
            })?;
        }
        if counter % self.config.save_every == 0 {
            // Snapshot failures degrade, they don't stop the run.
            if let Err(err) = self.save_snapshot() {
                log::warn!("snapshot failed: {err}");
            }
        }

        Ok(StepReport {
            generation: counter,
            complexity: self.scheduler.current(),
            best_fitness,
            grew,
        })
    }

    /// Persists the best individual's rendering now, outside the normal
    /// snapshot cadence. Driven by the interactive force-save control.
    pub fn save_snapshot(&mut self) -> Result<PathBuf, EvoError> {
        let best = self
            .best
            .as_ref()
            .or_else(|| self.generation.first())
            .expect("population is never empty");
        let fitness = best.fitness().unwrap_or(0.0);
        // The recorded best can predate the latest growth event, so its
        // complexity comes from its own genome length.
        let polygons = genome::decode(best.genome(), best.genome().len() / genome::POLYGON_BITS)?;
        self.snapshot.save(&polygons, self.count, fitness)
    }

    /// Growth path: rebuild the entire population at the new genome
    /// length by cycling the elite set and appending the scheduler's
    /// padding bits, then re-evaluate everything. No crossover happens
    /// here; the step only extends dimensionality.
    fn upgrade_generation(&mut self) -> Result<(), EvoError> {
        let elite = self.fittests(self.config.elitism_size)?;
        let offset = self.scheduler.offset().clone();

        self.generation = (0..self.config.generation_size)
            .map(|i| {
                let mut genome = elite[i % elite.len()].genome().clone();
                genome.extend(&offset);
                Individual::from_genome(genome)
            })
            .collect();
        self.evaluate_generation()
    }

    /// Reproduction path: capture the elite, breed the remainder via
    /// selection + procreation, evaluate the offspring behind a full
    /// barrier, then append the elite unchanged.
    fn next_generation(&mut self) -> Result<(), EvoError> {
        let elite = self.fittests(self.config.elitism_size)?;
        let offspring_count = self.config.generation_size - self.config.elitism_size;
        let mutation_prob = self.scheduler.probability();

        let mut offspring = Vec::with_capacity(self.config.generation_size);
        match self.config.selection {
            Selection::Roulette => {
                // One mating pool per generation; parents drawn
                // uniformly from the pool with replacement.
                let pool =
                    selection::roulette(&self.generation, self.config.selection_size, &mut self.rng)?;
                for _ in 0..offspring_count {
                    let father = &self.generation[pool[self.rng.random_range(0..pool.len())]];
                    let mother = &self.generation[pool[self.rng.random_range(0..pool.len())]];
                    let child = father.procreate(
                        mother,
                        self.config.crossover_prob,
                        mutation_prob,
                        self.config.crossover,
                        &mut self.rng,
                    )?;
                    offspring.push(Individual::from_genome(child));
                }
            }
            Selection::Tournament => {
                for _ in 0..offspring_count {
                    let father_idx = selection::tournament(
                        &self.generation,
                        self.config.selection_size,
                        &mut self.rng,
                    )?;
                    let mother_idx = selection::tournament(
                        &self.generation,
                        self.config.selection_size,
                        &mut self.rng,
                    )?;
                    let child = self.generation[father_idx].procreate(
                        &self.generation[mother_idx],
                        self.config.crossover_prob,
                        mutation_prob,
                        self.config.crossover,
                        &mut self.rng,
                    )?;
                    offspring.push(Individual::from_genome(child));
                }
            }
        }

        evaluate_batch(
            &self.evaluator,
            &mut offspring,
            self.scheduler.current(),
            self.config.parallel,
        )?;

        // Elite carry-over restores the generation-size invariant.
        offspring.extend(elite);
        self.generation = offspring;
        Ok(())
    }

    /// Evaluates every individual in the current population behind a
    /// full synchronization barrier.
    fn evaluate_generation(&mut self) -> Result<(), EvoError> {
        evaluate_batch(
            &self.evaluator,
            &mut self.generation,
            self.scheduler.current(),
            self.config.parallel,
        )
    }

    /// Clones the top `n` individuals by fitness, best first. Ties keep
    /// population order.
    fn fittests(&self, n: usize) -> Result<Vec<Individual>, EvoError> {
        let mut scored: Vec<(usize, f64)> = self
            .generation
            .iter()
            .enumerate()
            .map(|(i, ind)| Ok((i, ind.scored_fitness(i)?)))
            .collect::<Result<_, EvoError>>()?;
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .iter()
            .take(n)
            .map(|&(i, _)| self.generation[i].clone())
            .collect())
    }

    /// Records the new population's best as the run's best-ever when it
    /// improves on the previous best; ties prefer the newer candidate.
    fn remember_fittest(&mut self) -> Result<(), EvoError> {
        let gen_best = self
            .fittests(1)?
            .pop()
            .expect("population is never empty");
        let gen_fitness = gen_best
            .fitness()
            .expect("fittests only returns scored individuals");

        let improves = match self.best.as_ref().and_then(Individual::fitness) {
            Some(recorded) => gen_fitness >= recorded,
            None => true,
        };
        if improves {
            self.best = Some(gen_best);
        }
        Ok(())
    }
}

/// Evaluates a batch of individuals, in parallel when requested.
///
/// Results are collected before returning: callers see a fully scored
/// batch or the first error, never a partially evaluated one in use.
fn evaluate_batch<E: Evaluator>(
    evaluator: &E,
    individuals: &mut [Individual],
    polygon_count: usize,
    parallel: bool,
) -> Result<(), EvoError> {
    if parallel {
        individuals
            .par_iter_mut()
            .map(|ind| {
                let fitness = evaluator.evaluate(ind.genome(), polygon_count)?;
                ind.set_fitness(fitness);
                Ok(())
            })
            .collect()
    } else {
        for ind in individuals.iter_mut() {
            let fitness = evaluator.evaluate(ind.genome(), polygon_count)?;
            ind.set_fitness(fitness);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
