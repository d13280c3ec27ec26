//! Character-level Markov chain used to invent words.
//!
//! The model is split into small leaves:
//! - The letter codec (`Alphabet`)
//! - The rolling context window and its row arithmetic (`ContextEncoder`)
//! - The count / cumulative probability matrix (`TransitionTable`)
//! - The set of trained words (`Vocabulary`)
//! - The orchestrating sampler (`PseudowordGenerator`)

/// Letters the model may learn and emit, and the reserved boundary markers.
pub mod alphabet;

/// Fixed-width context window and its mapping to table rows.
pub mod context;

/// High-level interface: training, compilation and rejection sampling.
pub mod generator;

/// Dense transition matrix: raw counts, cumulative distributions and
/// per-row sampling.
pub mod transition_table;

/// Trained word set used to reject real words.
pub mod vocabulary;
