//! # Error Types
//!
//! This module defines the error type used throughout the engine. Configuration
//! mistakes (probabilities outside `[0, 1]`, tournament size of zero, inverted
//! ranges) fail fast at construction or at the offending call; values are never
//! silently clamped. Evaluation failures raised by a [`Problem`](crate::problem::Problem)
//! propagate up and abort the run.
//!
//! ## Examples
//!
//! ```rust
//! use evokit::error::{EvoError, Result};
//!
//! fn check_probability(p: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(EvoError::InvalidParameter(format!(
//!             "probability must be in [0, 1], got {}",
//!             p
//!         )));
//!     }
//!     Ok(p)
//! }
//!
//! assert!(check_probability(1.5).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum EvoError {
    /// A configuration value is outside its legal domain, e.g. a crossover
    /// probability outside `[0, 1]` or a tournament size of zero.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A range request with inverted bounds, e.g. a PRNG draw with `lo > hi`
    /// or a bit-range read with `hi <= lo`.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A fitness evaluation inside the problem collaborator failed. This
    /// aborts the run; the engine does not retry or swallow it.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// An operator was asked to work on an empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The engine itself failed, e.g. its worker thread panicked.
    #[error("Engine error: {0}")]
    Engine(String),
}

/// A specialized `Result` type with the error fixed to [`EvoError`].
pub type Result<T> = std::result::Result<T, EvoError>;
