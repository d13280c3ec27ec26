use crate::error::ConfigurationError;

/// Letters accepted by default: upper-case ASCII.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of preceding letters a transition is conditioned on.
pub const DEFAULT_CONTEXT_ORDER: usize = 2;

/// Vocabulary size the word set is pre-sized for.
pub const DEFAULT_EXPECTED_VOCABULARY_SIZE: usize = 200_000;

/// Construction parameters of a [`PseudowordGenerator`](crate::model::generator::PseudowordGenerator).
///
/// # Responsibilities
/// - Hold the alphabet, the context order and the vocabulary size hint
/// - Reject obviously invalid values as early as possible
///
/// # Invariants
/// - `context_order` is always >= 1
/// - `alphabet` is never empty
///
/// Alphabet content (duplicates, reserved markers) is validated when the
/// generator is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
	alphabet: String,
	context_order: usize,

	/// Capacity hint for the vocabulary set. Not a limit.
	pub expected_vocabulary_size: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			alphabet: DEFAULT_ALPHABET.to_owned(),
			context_order: DEFAULT_CONTEXT_ORDER,
			expected_vocabulary_size: DEFAULT_EXPECTED_VOCABULARY_SIZE,
		}
	}
}

impl GeneratorConfig {
	/// Creates a configuration with the given alphabet and order.
	///
	/// # Errors
	/// Returns an error if the alphabet is empty or the order is zero.
	pub fn new(alphabet: &str, context_order: usize) -> Result<Self, ConfigurationError> {
		let mut config = Self::default();
		config.set_alphabet(alphabet)?;
		config.set_context_order(context_order)?;
		Ok(config)
	}

	/// Returns the alphabet.
	pub fn alphabet(&self) -> &str {
		&self.alphabet
	}

	/// Returns the context order.
	pub fn context_order(&self) -> usize {
		self.context_order
	}

	/// Sets the alphabet.
	///
	/// # Errors
	/// Returns an error if `alphabet` is empty.
	pub fn set_alphabet(&mut self, alphabet: &str) -> Result<(), ConfigurationError> {
		if alphabet.is_empty() {
			return Err(ConfigurationError::EmptyAlphabet);
		}
		self.alphabet = alphabet.to_owned();
		Ok(())
	}

	/// Sets the context order.
	///
	/// # Errors
	/// Returns an error if `context_order` is zero.
	pub fn set_context_order(&mut self, context_order: usize) -> Result<(), ConfigurationError> {
		if context_order == 0 {
			return Err(ConfigurationError::InvalidContextOrder);
		}
		self.context_order = context_order;
		Ok(())
	}
}

/// Settings of a [`WordPicker`](crate::picker::WordPicker).
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
	min_word_length: usize,
	max_word_length: usize,
	real_word_ratio: f64,
	max_attempts: usize,
}

impl Default for PickerConfig {
	fn default() -> Self {
		Self {
			min_word_length: 2,
			max_word_length: 15,
			real_word_ratio: 0.5,
			max_attempts: 10_000,
		}
	}
}

impl PickerConfig {
	/// Shortest word length a caller may ask for.
	pub fn min_word_length(&self) -> usize {
		self.min_word_length
	}

	/// Longest word length a caller may ask for.
	pub fn max_word_length(&self) -> usize {
		self.max_word_length
	}

	/// Probability that a picked slot holds a real word.
	pub fn real_word_ratio(&self) -> f64 {
		self.real_word_ratio
	}

	/// Candidates drawn for one fake word before giving up.
	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	/// Sets the allowed word length range (inclusive).
	///
	/// # Errors
	/// Returns an error if `min` is zero or greater than `max`.
	pub fn set_word_lengths(&mut self, min: usize, max: usize) -> Result<(), ConfigurationError> {
		if min == 0 || min > max {
			return Err(ConfigurationError::InvalidPickerSetting(format!(
				"word length range {min}..={max} is empty or starts at zero"
			)));
		}
		self.min_word_length = min;
		self.max_word_length = max;
		Ok(())
	}

	/// Sets the real word ratio (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_real_word_ratio(&mut self, ratio: f64) -> Result<(), ConfigurationError> {
		if !(0.0..=1.0).contains(&ratio) {
			return Err(ConfigurationError::InvalidPickerSetting(
				"real word ratio must be between 0.0 and 1.0".to_owned(),
			));
		}
		self.real_word_ratio = ratio;
		Ok(())
	}

	/// Sets the per-word attempt budget.
	///
	/// # Errors
	/// Returns an error if `max_attempts` is zero.
	pub fn set_max_attempts(&mut self, max_attempts: usize) -> Result<(), ConfigurationError> {
		if max_attempts == 0 {
			return Err(ConfigurationError::InvalidPickerSetting(
				"max attempts must be >= 1".to_owned(),
			));
		}
		self.max_attempts = max_attempts;
		Ok(())
	}
}
