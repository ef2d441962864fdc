//! The evolutionary engine.
//!
//! # Key types
//!
//! - [`EvoConfig`]: loop parameters (population sizes, operators, cadences)
//! - [`Individual`]: a genome plus its cached fitness
//! - [`Selection`]: parent selection policy (tournament / roulette)
//! - [`SizeScheduler`]: scheduled complexity growth and mutation tuning
//! - [`Evolution`]: the per-generation step state machine
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod engine;
mod individual;
mod scheduler;
mod selection;

pub use config::EvoConfig;
pub use engine::{Evolution, StepReport};
pub use individual::Individual;
pub use scheduler::SizeScheduler;
pub use selection::Selection;
