//! Evolutionary image approximation.
//!
//! Approximates a target raster image by evolving a population of
//! candidate renderings, each encoded as a fixed-format bit string
//! describing a small set of translucent triangles.
//!
//! The crate is organized around the evolutionary core:
//!
//! - [`genome`]: bit-string genomes, the polygon bit-field codec, and
//!   the crossover/mutation operators.
//! - [`evo`]: individuals, selection strategies, the adaptive
//!   complexity scheduler, and the generation-step engine.
//! - [`fitness`]: the decode → rasterize → compare evaluation pipeline
//!   behind pluggable [`fitness::Rasterizer`] and
//!   [`fitness::ImageComparator`] traits.
//! - [`report`]: progress records and PNG snapshot persistence.
//!
//! # Architecture
//!
//! The engine drives everything: each [`evo::Evolution::step`] call
//! evaluates, selects, reproduces, and applies elitism, while the
//! [`evo::SizeScheduler`] grows the polygon count on a fixed
//! generation-count timetable. Fitness evaluation is a pure function of
//! `(genome, target)` and runs across a rayon worker pool with a full
//! barrier before selection begins.

pub mod error;
pub mod evo;
pub mod fitness;
pub mod genome;
pub mod random;
pub mod report;

pub use error::EvoError;
