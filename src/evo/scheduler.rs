//! Adaptive complexity scheduling.
//!
//! [`SizeScheduler`] is the sole mechanism by which the search-space
//! dimensionality changes over a run: it grows the polygon count on a
//! fixed generation-count timetable and re-tunes the per-bit mutation
//! probability to the new genome length. Growth is deliberately
//! decoupled from fitness so runs stay reproducible and comparable.

use crate::genome::{BitString, POLYGON_BITS};
use rand::Rng;

/// Default polygon count at the start of a run.
pub const DEFAULT_START: usize = 1;

/// Default polygon count ceiling.
pub const DEFAULT_STOP: usize = 50;

/// Polygons added per growth event.
pub const DEFAULT_STEP: usize = 1;

/// Base number of generations between growth events. Each event also
/// earns a size-dependent bonus, see [`bonus`].
pub const INCREASE_EVERY: u64 = 500;

/// Numerator of the mutation probability:
/// `p = PROB_FACTOR / (current * POLYGON_BITS)`.
pub const PROB_FACTOR: f64 = 0.19;

/// Extra generations granted before the next growth event.
///
/// Larger genomes search larger spaces and need more generations to
/// converge before dimensionality grows again.
fn bonus(size: usize) -> u64 {
    (size * size / 5) as u64
}

/// Tracks current genome complexity and decides when to grow it.
///
/// `current` moves `start → start+step → … → stop`, clamped so it never
/// exceeds `stop`. The `changed` flag is true for exactly one step per
/// growth event; the engine must consume it before the next
/// [`increase`](SizeScheduler::increase) call since it selects which
/// reproduction path that step takes.
#[derive(Debug)]
pub struct SizeScheduler {
    start: usize,
    stop: usize,
    step: usize,
    current: usize,
    timer: u64,
    probability: f64,
    changed: bool,
    offset: BitString,
}

impl SizeScheduler {
    /// Creates a scheduler running from `start` up to `stop` polygons,
    /// advancing by [`DEFAULT_STEP`] per growth event.
    pub fn new(start: usize, stop: usize) -> Self {
        Self::with_step(start, stop, DEFAULT_STEP)
    }

    /// Creates a scheduler with an explicit growth step.
    pub fn with_step(start: usize, stop: usize, step: usize) -> Self {
        let scheduler = Self {
            start,
            stop,
            step,
            current: start,
            timer: INCREASE_EVERY,
            probability: mutation_probability(start),
            changed: false,
            offset: BitString::new(Vec::new()),
        };
        log::info!(
            "Size: {} bits - Mutation prob: {}",
            scheduler.current * POLYGON_BITS,
            scheduler.probability
        );
        scheduler
    }

    /// Starting polygon count.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Polygon count ceiling.
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Current polygon count. Monotonically non-decreasing, never
    /// exceeds [`stop`](SizeScheduler::stop).
    pub fn current(&self) -> usize {
        self.current
    }

    /// Per-bit mutation probability for the current complexity.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// True for exactly the one step following a growth event.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Random padding bits generated by the last growth event, sized
    /// `grown_polygons * POLYGON_BITS`.
    pub fn offset(&self) -> &BitString {
        &self.offset
    }

    /// Advances the scheduler for generation `counter`.
    ///
    /// When the counter hits the internal timer and the ceiling has not
    /// been reached: grows `current` by `step` (clamped to `stop`),
    /// pushes the timer out by `INCREASE_EVERY + bonus(current)`,
    /// recomputes the mutation probability, draws fresh random padding
    /// bits for the grown polygons, and raises `changed`. Any other
    /// counter value only clears `changed`.
    pub fn increase<R: Rng>(&mut self, counter: u64, rng: &mut R) {
        if counter == self.timer && self.current < self.stop {
            let grown = self.step.min(self.stop - self.current);
            self.current += grown;
            self.timer += INCREASE_EVERY + bonus(self.current);
            self.probability = mutation_probability(self.current);
            self.offset = BitString::random(grown * POLYGON_BITS, rng);
            self.changed = true;
            log::info!("Increase: {} polygons", self.current);
            log::info!(
                "Size: {} bits - Mutation prob: {}",
                self.current * POLYGON_BITS,
                self.probability
            );
        } else {
            self.changed = false;
        }
    }
}

/// Mutation probability inversely proportional to total genome length.
fn mutation_probability(polygon_count: usize) -> f64 {
    PROB_FACTOR / (polygon_count * POLYGON_BITS) as f64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn test_initial_state() {
        let s = SizeScheduler::new(1, 50);
        assert_eq!(s.current(), 1);
        assert!(!s.changed());
        assert!((s.probability() - PROB_FACTOR / 39.0).abs() < 1e-12);
        assert!(s.offset().is_empty());
    }

    #[test]
    fn test_growth_triggers_exactly_at_timer() {
        let mut rng = seeded_rng(42);
        let mut s = SizeScheduler::new(1, 50);

        s.increase(INCREASE_EVERY - 1, &mut rng);
        assert!(!s.changed());
        assert_eq!(s.current(), 1);

        s.increase(INCREASE_EVERY, &mut rng);
        assert!(s.changed());
        assert_eq!(s.current(), 2);
        assert_eq!(s.offset().len(), POLYGON_BITS);
        assert!((s.probability() - PROB_FACTOR / (2.0 * 39.0)).abs() < 1e-12);
    }

    #[test]
    fn test_changed_clears_on_next_call() {
        let mut rng = seeded_rng(42);
        let mut s = SizeScheduler::new(1, 50);
        s.increase(INCREASE_EVERY, &mut rng);
        assert!(s.changed());
        s.increase(INCREASE_EVERY + 1, &mut rng);
        assert!(!s.changed());
    }

    #[test]
    fn test_timer_strictly_increases_with_bonus() {
        let mut rng = seeded_rng(42);
        let mut s = SizeScheduler::new(1, 50);
        s.increase(INCREASE_EVERY, &mut rng);

        // After growing to 2: next trigger at 500 + 500 + floor(4/5).
        let next = INCREASE_EVERY * 2 + bonus(2);
        s.increase(next - 1, &mut rng);
        assert!(!s.changed());
        s.increase(next, &mut rng);
        assert!(s.changed());
        assert_eq!(s.current(), 3);
    }

    #[test]
    fn test_growth_clamps_at_stop() {
        let mut rng = seeded_rng(42);
        let mut s = SizeScheduler::with_step(4, 5, 3);
        s.increase(INCREASE_EVERY, &mut rng);
        assert!(s.changed());
        assert_eq!(s.current(), 5);
        // Only one polygon actually grew, so one field of padding.
        assert_eq!(s.offset().len(), POLYGON_BITS);
    }

    #[test]
    fn test_no_growth_at_ceiling() {
        let mut rng = seeded_rng(42);
        let mut s = SizeScheduler::new(5, 5);
        s.increase(INCREASE_EVERY, &mut rng);
        assert!(!s.changed());
        assert_eq!(s.current(), 5);
    }

    #[test]
    fn test_bonus_grows_quadratically() {
        assert_eq!(bonus(2), 0);
        assert_eq!(bonus(5), 5);
        assert_eq!(bonus(10), 20);
        assert_eq!(bonus(50), 500);
    }
}
