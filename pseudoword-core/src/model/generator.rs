use log::{debug, info};
use rand::Rng;
use rand::distr::Open01;

use crate::config::GeneratorConfig;
use crate::error::{ConfigurationError, DeadStateError, TrainError};
use crate::model::alphabet::Alphabet;
use crate::model::context::ContextEncoder;
use crate::model::transition_table::TransitionTable;
use crate::model::vocabulary::Vocabulary;

/// Fixed-order character Markov chain that invents words.
///
/// # Responsibilities
/// - Learn letter transitions from dictionary words (`train`)
/// - Turn counts into sampling distributions (`compile`)
/// - Sample new words, rejecting dictionary words and, optionally,
///   words failing a caller predicate
///
/// # Lifecycle
/// Train every word, call [`compile`](Self::compile) once, then share the
/// generator read-only. All sampling methods take `&self`; the word being
/// built and its context window live on the caller's stack, and randomness
/// comes from the caller's RNG.
#[derive(Debug, Clone)]
pub struct PseudowordGenerator {
	alphabet: Alphabet,
	/// Positioned at a word start; cloned for every training or sampling pass.
	encoder: ContextEncoder,
	table: TransitionTable,
	vocabulary: Vocabulary,
}

impl PseudowordGenerator {
	/// Creates an untrained generator from a configuration.
	///
	/// # Errors
	/// Returns an error if the alphabet is invalid or the state space is too large.
	pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigurationError> {
		let alphabet = Alphabet::new(config.alphabet())?;
		let encoder = ContextEncoder::new(alphabet.len(), config.context_order())?;
		let table = TransitionTable::new(encoder.num_rows(), encoder.num_columns());

		Ok(Self {
			alphabet,
			encoder,
			table,
			vocabulary: Vocabulary::with_capacity(config.expected_vocabulary_size),
		})
	}

	/// Shorthand for [`new`](Self::new) with a small vocabulary hint.
	pub fn with_alphabet(alphabet: &str, context_order: usize) -> Result<Self, ConfigurationError> {
		let mut config = GeneratorConfig::new(alphabet, context_order)?;
		config.expected_vocabulary_size = 0;
		Self::new(&config)
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	pub fn context_order(&self) -> usize {
		self.encoder.order()
	}

	/// Transition table, for inspection.
	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Number of distinct trained words.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// Adds a dictionary word to the model.
	///
	/// Walks the window over `START.., w0, .., wN-1, END`, recording N + 1
	/// transitions. Training the same word twice counts it twice.
	///
	/// # Errors
	/// Returns an error, leaving the model untouched, if the word is empty or
	/// contains a character outside the alphabet.
	pub fn train(&mut self, word: &str) -> Result<(), TrainError> {
		let letters = self.alphabet.encode(word)?;

		let mut context = self.encoder.clone();
		for letter in letters {
			self.table.record(context.row_index(), letter);
			context.advance(letter);
		}
		self.table.record(context.row_index(), context.end_column());

		self.vocabulary.insert(word);
		Ok(())
	}

	/// Converts the transition counts into sampling distributions.
	///
	/// Must be called after training and before sampling. Idempotent.
	pub fn compile(&mut self) {
		self.table.compile();
		let dead_rows = (0..self.table.num_rows()).filter(|&row| self.table.is_dead(row)).count();
		info!(
			"Compiled {} observations from {} words ({} of {} contexts unobserved)",
			self.table.total_observations(),
			self.vocabulary.len(),
			dead_rows,
			self.table.num_rows()
		);
	}

	/// Whether `word` was accepted by [`train`](Self::train).
	pub fn is_trained_word(&self, word: &str) -> bool {
		self.vocabulary.contains(word)
	}

	/// Draws one candidate word with no rejection applied.
	///
	/// The result may be a dictionary word. Use this to build a retry loop
	/// with an attempt budget; otherwise prefer [`generate`](Self::generate).
	///
	/// # Errors
	/// Returns [`DeadStateError`] if sampling reaches an unobserved context.
	pub fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, DeadStateError> {
		self.build_candidate(&mut || rng.sample::<f64, _>(Open01))
	}

	/// Generates a word that is not in the vocabulary.
	///
	/// Retries until a candidate is accepted. There is no attempt limit.
	///
	/// # Errors
	/// Returns [`DeadStateError`] if sampling reaches an unobserved context.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, DeadStateError> {
		self.generate_matching(rng, |_| true)
	}

	/// Generates a word that is not in the vocabulary and satisfies `predicate`.
	///
	/// The predicate is only consulted on complete candidates. Retries until
	/// one is accepted; a predicate nothing can satisfy never returns.
	///
	/// # Errors
	/// Returns [`DeadStateError`] if sampling reaches an unobserved context.
	pub fn generate_matching<R, P>(&self, rng: &mut R, predicate: P) -> Result<String, DeadStateError>
	where
		R: Rng + ?Sized,
		P: Fn(&str) -> bool,
	{
		loop {
			let candidate = self.sample_candidate(rng)?;
			if self.accepts(&candidate) && predicate(&candidate) {
				return Ok(candidate);
			}
			debug!("Rejected candidate {candidate:?}");
		}
	}

	/// Whether a complete candidate may be handed out.
	pub(crate) fn accepts(&self, candidate: &str) -> bool {
		!candidate.is_empty() && !self.vocabulary.contains(candidate)
	}

	/// Walks the chain from a word start until END is drawn.
	///
	/// `draw` yields uniform values in `(0, 1)`.
	pub(crate) fn build_candidate<D>(&self, draw: &mut D) -> Result<String, DeadStateError>
	where
		D: FnMut() -> f64,
	{
		let mut context = self.encoder.clone();
		let mut word = String::new();

		loop {
			let column = self.table.sample(context.row_index(), draw())?;
			match self.alphabet.symbol(column) {
				Some(letter) => {
					word.push(letter);
					context.advance(column);
				}
				None => return Ok(word),
			}
		}
	}
}
