//! Error taxonomy for the evolutionary core.
//!
//! Genome-shape violations ([`EvoError::MalformedGenome`],
//! [`EvoError::LengthMismatch`]) indicate a bug in complexity-growth
//! bookkeeping and are never repaired or retried. I/O variants exist for
//! the binary surface (target load, snapshot write); the core itself
//! performs no I/O.

use std::path::PathBuf;

/// All failure modes surfaced by this crate.
///
/// Fitness-invariant and genome-shape errors are fatal by design: the
/// engine favors fast, loud failure over silently repairing a corrupted
/// bit layout.
#[derive(Debug, thiserror::Error)]
pub enum EvoError {
    /// Engine construction parameters violate the required ordering
    /// `generation > selection > elitism > 0`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A genome's bit length does not match the declared polygon count.
    #[error("malformed genome: expected {expected} bits for {polygons} polygons, got {actual}")]
    MalformedGenome {
        /// Required bit length (`POLYGON_BITS * polygons`).
        expected: usize,
        /// Actual genome length.
        actual: usize,
        /// Declared polygon count.
        polygons: usize,
    },

    /// Crossover attempted between parents of different genome lengths.
    #[error("genome length mismatch: {left} vs {right} bits")]
    LengthMismatch {
        /// Length of the first parent's genome.
        left: usize,
        /// Length of the second parent's genome.
        right: usize,
    },

    /// Roulette selection over a population whose total fitness is zero.
    #[error("degenerate selection: total fitness is zero")]
    DegenerateSelection,

    /// Selection attempted on a population with unevaluated individuals.
    #[error("unscored population: individual {index} has no fitness")]
    UnscoredPopulation {
        /// Index of the first unevaluated individual found.
        index: usize,
    },

    /// Target image could not be loaded. Fatal: no run without a target.
    #[error("failed to load target image {path}: {source}")]
    TargetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Snapshot could not be written. Callers log and continue.
    #[error("failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Report file I/O failure.
    #[error("report i/o error")]
    Report(#[from] std::io::Error),
}
