use std::collections::HashMap;

use crate::error::{ConfigurationError, TrainError};

/// Marker for the start of a word. May not appear in an alphabet.
pub const START_CHAR: char = '^';

/// Marker for the end of a word. May not appear in an alphabet.
pub const END_CHAR: char = '$';

/// Ordered set of letters a generator may learn and emit.
///
/// Each letter gets a dense index `0..len()` in declaration order. The
/// index doubles as the letter's transition table column.
///
/// # Invariants
/// - At least one letter
/// - Letters are unique and never a boundary marker
#[derive(Debug, Clone)]
pub struct Alphabet {
	symbols: Vec<char>,
	indexes: HashMap<char, usize>,
}

impl Alphabet {
	/// Builds an alphabet from the characters of `letters`.
	///
	/// # Errors
	/// Returns an error if `letters` is empty, repeats a character or
	/// contains [`START_CHAR`] / [`END_CHAR`].
	pub fn new(letters: &str) -> Result<Self, ConfigurationError> {
		let symbols: Vec<char> = letters.chars().collect();
		if symbols.is_empty() {
			return Err(ConfigurationError::EmptyAlphabet);
		}

		let mut indexes = HashMap::with_capacity(symbols.len());
		for (index, &symbol) in symbols.iter().enumerate() {
			if symbol == START_CHAR || symbol == END_CHAR {
				return Err(ConfigurationError::ReservedSymbol(symbol));
			}
			if indexes.insert(symbol, index).is_some() {
				return Err(ConfigurationError::DuplicateSymbol(symbol));
			}
		}

		Ok(Self { symbols, indexes })
	}

	/// Number of letters (A).
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Always false; kept for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Dense index of `symbol`, if it belongs to the alphabet.
	pub fn index_of(&self, symbol: char) -> Option<usize> {
		self.indexes.get(&symbol).copied()
	}

	/// Letter at `index`.
	pub fn symbol(&self, index: usize) -> Option<char> {
		self.symbols.get(index).copied()
	}

	/// Encodes a whole word into letter indexes.
	///
	/// # Errors
	/// Fails on an empty word or on the first character outside the alphabet.
	pub fn encode(&self, word: &str) -> Result<Vec<usize>, TrainError> {
		if word.is_empty() {
			return Err(TrainError::Empty);
		}
		word.chars()
			.enumerate()
			.map(|(position, character)| {
				self.index_of(character)
					.ok_or(TrainError::IllegalCharacter { character, position })
			})
			.collect()
	}

	/// Letters in index order.
	pub fn symbols(&self) -> &[char] {
		&self.symbols
	}
}
