//! Fixed-length bit-string genomes and their genetic operators.
//!
//! [`BitString`] is a dedicated genome type rather than an alias for a
//! generic collection: the bit-layout invariants (length is always a
//! whole number of polygon fields) stay local to this module, and the
//! mutation/crossover operators cannot be applied to arbitrary vectors
//! by accident.
//!
//! # Operators
//!
//! - [`BitString::mutate`]: independent per-bit Bernoulli flip
//! - [`Crossover::recombine`]: uniform, one-point, or two-point
//!   recombination of two equal-length parents
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use crate::error::EvoError;
use rand::Rng;

/// An ordered, fixed-length sequence of bits encoding one candidate.
///
/// Owned exclusively by one individual; reproduction always produces a
/// fresh, copied `BitString`, never an alias into a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Creates a genome from raw bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Creates a uniformly random genome of `len` bits.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the genome holds no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read-only view of the bits.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Appends `padding` to the end of this genome.
    ///
    /// Used by the growth path: when the scheduler raises the polygon
    /// count, every surviving genome is extended by the scheduler's
    /// fresh random padding so the length invariant holds at the new
    /// complexity.
    pub fn extend(&mut self, padding: &BitString) {
        self.0.extend_from_slice(&padding.0);
    }

    /// Flips every bit independently with probability `probability`.
    ///
    /// The caller is responsible for invalidating any cached fitness;
    /// after mutation the old score is stale.
    pub fn mutate<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        for bit in &mut self.0 {
            if rng.random::<f64>() < probability {
                *bit = !*bit;
            }
        }
    }
}

/// Crossover variant. Closed set, dispatched by `match`.
///
/// All variants require equal-length parents and produce a child of the
/// same length. A length mismatch is an invariant violation
/// ([`EvoError::LengthMismatch`]), not a recoverable condition: under
/// correct scheduler discipline every genome in a generation has the
/// same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Independent random mask per position: mask bit 1 takes the first
    /// parent's bit, 0 the second's.
    #[default]
    Uniform,
    /// One random cut index; segments alternate parents.
    OnePoint,
    /// Two distinct random cut indices; segments alternate parents.
    TwoPoint,
}

impl Crossover {
    /// Produces a child genome from two equal-length parents.
    ///
    /// Point variants scan left to right starting with `a` and switch
    /// the supplying parent at each cut index.
    pub fn recombine<R: Rng>(
        &self,
        a: &BitString,
        b: &BitString,
        rng: &mut R,
    ) -> Result<BitString, EvoError> {
        if a.len() != b.len() {
            return Err(EvoError::LengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        let child = match self {
            Crossover::Uniform => uniform(a, b, rng),
            Crossover::OnePoint => point(a, b, 1, rng),
            Crossover::TwoPoint => point(a, b, 2, rng),
        };
        Ok(child)
    }
}

fn uniform<R: Rng>(a: &BitString, b: &BitString, rng: &mut R) -> BitString {
    let bits = a
        .bits()
        .iter()
        .zip(b.bits())
        .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
        .collect();
    BitString::new(bits)
}

/// N-point crossover with distinct cut indices in `[0, len)`.
fn point<R: Rng>(a: &BitString, b: &BitString, cuts: usize, rng: &mut R) -> BitString {
    let len = a.len();
    let mut points = Vec::with_capacity(cuts);
    while points.len() < cuts && points.len() < len {
        let idx = rng.random_range(0..len);
        if !points.contains(&idx) {
            points.push(idx);
        }
    }

    let mut from_a = true;
    let bits = (0..len)
        .map(|i| {
            if points.contains(&i) {
                from_a = !from_a;
            }
            if from_a {
                a.bits()[i]
            } else {
                b.bits()[i]
            }
        })
        .collect();
    BitString::new(bits)
}

// ============================================================================
// Tests
// ============================================================================
