//! Markov chain pseudoword generation library.
//!
//! This crate learns letter transitions from a dictionary and invents
//! word-like strings that are not in it:
//! - Fixed-order, character-level transition model
//! - Rejection sampling against the dictionary and caller predicates
//! - Dictionary loading with line-level error reporting
//! - Mixed real / fake word lists for guessing games

/// Generator and picker settings.
pub mod config;

/// Error types.
pub mod error;

/// Dictionary loading.
pub mod loader;

/// Core Markov model and generation logic.
pub mod model;

/// Real / fake word list selection.
pub mod picker;

/// Dictionary file helpers.
///
/// Not exposed
pub(crate) mod io;

pub use config::{GeneratorConfig, PickerConfig};
pub use error::{ConfigurationError, DeadStateError, LoadError, PickError, TrainError};
pub use loader::{Dictionary, DictionaryEntry};
pub use model::generator::PseudowordGenerator;
pub use picker::{WordDescription, WordIndex, WordPicker};
