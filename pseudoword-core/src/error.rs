//! Error types for the pseudoword generator and its loaders.

use thiserror::Error;

/// Invalid generator or picker configuration.
///
/// Raised at construction time; a generator is never built from a
/// configuration that fails these checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
	/// The alphabet has no symbols.
	#[error("Alphabet must contain at least one symbol")]
	EmptyAlphabet,

	/// A symbol appears twice in the alphabet.
	#[error("Alphabet symbol {0:?} appears more than once")]
	DuplicateSymbol(char),

	/// The alphabet contains one of the reserved word boundary markers.
	#[error("Alphabet symbol {0:?} is reserved as a word boundary marker")]
	ReservedSymbol(char),

	/// The context order is zero.
	#[error("Context order must be >= 1")]
	InvalidContextOrder,

	/// The transition table for this alphabet and order would not fit in memory.
	#[error("State space for alphabet size {alphabet_size} and order {order} is too large")]
	StateSpaceTooLarge { alphabet_size: usize, order: usize },

	/// A picker setting is out of range.
	#[error("Invalid picker setting: {0}")]
	InvalidPickerSetting(String),
}

/// A word rejected by [`train`](crate::model::generator::PseudowordGenerator::train).
///
/// Training is atomic: when this is returned neither the vocabulary nor the
/// transition counts have changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrainError {
	/// The word is empty.
	#[error("Word is empty")]
	Empty,

	/// The word contains a character outside the alphabet.
	#[error("Illegal character {character:?} at position {position}")]
	IllegalCharacter { character: char, position: usize },
}

/// Sampling reached a context that was never observed during training.
///
/// The row has no outgoing transitions, so there is no letter to pick.
/// This is also what sampling an uncompiled generator yields.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Context row {row} has no observed transitions")]
pub struct DeadStateError {
	pub row: usize,
}

/// Failure to build a generator from a dictionary.
#[derive(Debug, Error)]
pub enum LoadError {
	/// IO error
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Configuration error
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	/// A dictionary line holds a word the generator cannot train on.
	#[error("Error in dictionary on line {line}: word {word:?} is empty or has prohibited characters ({source})")]
	BadWord {
		line: usize,
		word: String,
		#[source]
		source: TrainError,
	},
}

/// Failure to pick a list of words.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickError {
	/// No index with that name.
	#[error("Unknown word index: {0}")]
	UnknownIndex(String),

	/// The generator hit a dead context.
	#[error(transparent)]
	DeadState(#[from] DeadStateError),

	/// No acceptable pseudoword within the attempt budget.
	#[error("Could not produce a word after {0} attempts")]
	AttemptsExhausted(usize),
}
