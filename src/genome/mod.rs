//! Genome representation and decoding.
//!
//! A genome is a fixed-length [`BitString`] whose length is always
//! `POLYGON_BITS * polygon_count`. [`polygon::decode`] turns a genome
//! into its ordered polygon list; the genetic operators live on
//! [`BitString`] and [`Crossover`].

mod bits;
pub mod polygon;

pub use bits::{BitString, Crossover};
pub use polygon::{decode, Polygon, POLYGON_BITS, VERTEX_COUNT, ZOOM};
