use log::warn;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::PickerConfig;
use crate::error::PickError;
use crate::loader::{Dictionary, DictionaryEntry};
use crate::model::generator::PseudowordGenerator;

/// A word handed to a player: real (with its definition) or invented.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WordDescription {
	pub word: String,
	pub description: String,
	pub is_real: bool,
}

impl WordDescription {
	fn real(entry: &DictionaryEntry) -> Self {
		Self {
			word: entry.word.clone(),
			description: entry.definition.clone(),
			is_real: true,
		}
	}

	fn fake(word: String) -> Self {
		Self { word, description: String::new(), is_real: false }
	}
}

/// A named family of words, such as "words containing a Q".
///
/// The pattern must match the whole word.
#[derive(Debug, Clone)]
pub struct WordIndex {
	name: String,
	title: String,
	pattern: Regex,
}

impl WordIndex {
	/// Creates an index; `pattern` is anchored on both ends.
	///
	/// # Errors
	/// Returns an error if `pattern` is not a valid regular expression.
	pub fn new(name: &str, title: &str, pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			name: name.to_owned(),
			title: title.to_owned(),
			pattern: Regex::new(&format!("^(?:{pattern})$"))?,
		})
	}

	/// Identifier used in requests.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Human readable label.
	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn is_match(&self, word: &str) -> bool {
		self.pattern.is_match(word)
	}
}

/// Word families offered by the guessing game, for an upper-case alphabet.
///
/// # Errors
/// Only fails if one of the built-in patterns is invalid.
pub fn default_indexes() -> Result<Vec<WordIndex>, regex::Error> {
	[
		("j_words", "J words", ".*J.*"),
		("q_words", "Q words", ".*Q.*"),
		("q_without_u_words", "Q without U words", "(.*Q[^U].*)|(.*Q)"),
		("x_words", "X words", ".*X.*"),
		("z_words", "Z words", ".*Z.*"),
		("consonants", "Consonants Only", "[^AEIOU]*"),
		("all_vowels_but_one", "All vowels but one", "[AEIOU]*[^AEIOU][AEIOU]*"),
		("out_words", "OUT- words", "OUT.*"),
		("re_words", "RE- words", "RE.*"),
	]
	.into_iter()
	.map(|(name, title, pattern)| WordIndex::new(name, title, pattern))
	.collect()
}

/// Picks lists mixing real dictionary words and pseudowords.
///
/// # Responsibilities
/// - Bucket real words by length and by index membership
/// - Decide, slot by slot, between a real word and a fake one
/// - Produce fake words from the same bucket (length range or index pattern)
///   under a bounded number of attempts
///
/// Read-only once built; share it across threads and pass each call its own RNG.
#[derive(Debug)]
pub struct WordPicker {
	/// Sorted by length, file order within a length.
	entries: Vec<DictionaryEntry>,
	/// Char length of each entry.
	lengths: Vec<usize>,
	/// Index definitions with the positions of their member entries.
	indexes: Vec<(WordIndex, Vec<usize>)>,
	generator: PseudowordGenerator,
	config: PickerConfig,
}

impl WordPicker {
	pub fn new(dictionary: Dictionary, indexes: Vec<WordIndex>, config: PickerConfig) -> Self {
		let (mut entries, generator) = dictionary.into_parts();
		entries.sort_by_key(|entry| entry.word.chars().count());
		let lengths: Vec<usize> = entries.iter().map(|entry| entry.word.chars().count()).collect();

		let indexes = indexes
			.into_iter()
			.map(|index| {
				let members = entries
					.iter()
					.enumerate()
					.filter(|(_, entry)| index.is_match(&entry.word))
					.map(|(position, _)| position)
					.collect();
				(index, members)
			})
			.collect();

		Self { entries, lengths, indexes, generator, config }
	}

	pub fn generator(&self) -> &PseudowordGenerator {
		&self.generator
	}

	pub fn config(&self) -> &PickerConfig {
		&self.config
	}

	/// Indexes in declaration order.
	pub fn indexes(&self) -> impl Iterator<Item = &WordIndex> {
		self.indexes.iter().map(|(index, _)| index)
	}

	/// Names of the indexes in declaration order.
	pub fn index_names(&self) -> Vec<&str> {
		self.indexes().map(WordIndex::name).collect()
	}

	/// Number of real words in an index.
	pub fn index_size(&self, name: &str) -> Option<usize> {
		self.find_index(name).map(|(_, members)| members.len())
	}

	/// Picks `count` words whose length lies in `from..=to`.
	///
	/// `from` is clamped into the configured length range and `to` into
	/// `from..=max`.
	///
	/// # Errors
	/// Returns an error if a pseudoword cannot be produced.
	pub fn words_by_length<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		from: usize,
		to: usize,
		count: usize,
	) -> Result<Vec<WordDescription>, PickError> {
		let (from, to) = self.clamp_lengths(from, to);

		let start = self.lengths.partition_point(|&length| length < from);
		let end = self.lengths.partition_point(|&length| length <= to);
		let pool = &self.entries[start..end];

		self.pick(rng, count, pool.len(), |position| &pool[position], |word| {
			(from..=to).contains(&word.chars().count())
		})
	}

	/// Picks `count` words belonging to the index called `name`.
	///
	/// # Errors
	/// - Returns an error if there is no such index.
	/// - Returns an error if a pseudoword cannot be produced.
	pub fn words_from_index<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		name: &str,
		count: usize,
	) -> Result<Vec<WordDescription>, PickError> {
		let (index, members) = self
			.find_index(name)
			.ok_or_else(|| PickError::UnknownIndex(name.to_owned()))?;

		self.pick(rng, count, members.len(), |position| &self.entries[members[position]], |word| {
			index.is_match(word)
		})
	}

	/// Generates a single pseudoword satisfying `predicate`, within the attempt budget.
	///
	/// # Errors
	/// Returns an error on a dead context or when the budget runs out.
	pub fn fake_word<R, P>(&self, rng: &mut R, predicate: P) -> Result<String, PickError>
	where
		R: Rng + ?Sized,
		P: Fn(&str) -> bool,
	{
		let max_attempts = self.config.max_attempts();
		for _ in 0..max_attempts {
			let candidate = self.generator.sample_candidate(rng)?;
			if self.generator.accepts(&candidate) && predicate(&candidate) {
				return Ok(candidate);
			}
		}

		warn!("No acceptable pseudoword after {max_attempts} attempts");
		Err(PickError::AttemptsExhausted(max_attempts))
	}

	fn pick<'a, R, E, P>(
		&self,
		rng: &mut R,
		count: usize,
		pool_size: usize,
		real_at: E,
		predicate: P,
	) -> Result<Vec<WordDescription>, PickError>
	where
		R: Rng + ?Sized,
		E: Fn(usize) -> &'a DictionaryEntry,
		P: Fn(&str) -> bool,
	{
		let mut words = Vec::with_capacity(count);
		for _ in 0..count {
			// An empty pool always yields fakes
			if pool_size > 0 && rng.random_bool(self.config.real_word_ratio()) {
				words.push(WordDescription::real(real_at(rng.random_range(0..pool_size))));
			} else {
				words.push(WordDescription::fake(self.fake_word(rng, &predicate)?));
			}
		}
		Ok(words)
	}

	fn find_index(&self, name: &str) -> Option<&(WordIndex, Vec<usize>)> {
		self.indexes.iter().find(|(index, _)| index.name() == name)
	}

	fn clamp_lengths(&self, from: usize, to: usize) -> (usize, usize) {
		let min = self.config.min_word_length();
		let max = self.config.max_word_length();
		let from = from.clamp(min, max);
		(from, to.clamp(from, max))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GeneratorConfig;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const WORDS: &str = "\
AB a tiny word
BE to exist
BAD not good
BED place to sleep
DAB a small amount
BEAD small ball
DEAD not alive
BADE past of bid
ABED in bed
BEADED covered in beads
";

	fn picker(config: PickerConfig) -> WordPicker {
		let generator_config = GeneratorConfig::new("ABDE", 2).unwrap();
		let dictionary = Dictionary::from_text("small", WORDS, &generator_config).unwrap();
		let indexes = vec![
			WordIndex::new("d_words", "D words", ".*D.*").unwrap(),
			WordIndex::new("b_start", "B- words", "B.*").unwrap(),
		];
		WordPicker::new(dictionary, indexes, config)
	}

	#[test]
	fn default_indexes_match_whole_words() {
		let indexes = default_indexes().unwrap();
		assert_eq!(indexes.len(), 9);

		let q_without_u = indexes.iter().find(|i| i.name() == "q_without_u_words").unwrap();
		assert!(q_without_u.is_match("QAT"));
		assert!(q_without_u.is_match("TRANQ"));
		assert!(!q_without_u.is_match("QUEEN"));

		let out_words = indexes.iter().find(|i| i.name() == "out_words").unwrap();
		assert!(out_words.is_match("OUTDO"));
		assert!(!out_words.is_match("SHOUT"));
	}

	#[test]
	fn indexes_collect_their_members() {
		let picker = picker(PickerConfig::default());
		assert_eq!(picker.index_names(), vec!["d_words", "b_start"]);
		assert_eq!(picker.index_size("d_words"), Some(8));
		assert_eq!(picker.index_size("b_start"), Some(6));
		assert_eq!(picker.index_size("x_words"), None);
	}

	#[test]
	fn words_by_length_stay_in_range() {
		let picker = picker(PickerConfig::default());
		let mut rng = StdRng::seed_from_u64(11);
		let words = picker.words_by_length(&mut rng, 3, 4, 40).unwrap();

		assert_eq!(words.len(), 40);
		for word in &words {
			let length = word.word.chars().count();
			assert!((3..=4).contains(&length), "{word:?} out of range");
			assert_eq!(word.is_real, picker.generator().is_trained_word(&word.word));
			if !word.is_real {
				assert!(word.description.is_empty());
			}
		}
	}

	#[test]
	fn lengths_are_clamped() {
		let picker = picker(PickerConfig::default());
		assert_eq!(picker.clamp_lengths(0, 1), (2, 2));
		assert_eq!(picker.clamp_lengths(6, 3), (6, 6));
		assert_eq!(picker.clamp_lengths(3, 99), (3, 15));
	}

	#[test]
	fn ratio_zero_yields_only_fakes() {
		let mut config = PickerConfig::default();
		config.set_real_word_ratio(0.0).unwrap();
		let picker = picker(config);
		let mut rng = StdRng::seed_from_u64(3);

		let words = picker.words_from_index(&mut rng, "b_start", 20).unwrap();
		assert!(words.iter().all(|w| !w.is_real && w.word.starts_with('B')));
		assert!(words.iter().all(|w| !picker.generator().is_trained_word(&w.word)));
	}

	#[test]
	fn ratio_one_yields_only_real_words() {
		let mut config = PickerConfig::default();
		config.set_real_word_ratio(1.0).unwrap();
		let picker = picker(config);
		let mut rng = StdRng::seed_from_u64(5);

		let words = picker.words_from_index(&mut rng, "d_words", 20).unwrap();
		assert!(words.iter().all(|w| w.is_real && w.word.contains('D')));
		assert!(words.iter().all(|w| !w.description.is_empty()));
	}

	#[test]
	fn unknown_index_is_an_error() {
		let picker = picker(PickerConfig::default());
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(
			picker.words_from_index(&mut rng, "nope", 3),
			Err(PickError::UnknownIndex("nope".to_owned()))
		);
	}

	#[test]
	fn impossible_predicate_exhausts_attempts() {
		let mut config = PickerConfig::default();
		config.set_max_attempts(50).unwrap();
		let picker = picker(config);
		let mut rng = StdRng::seed_from_u64(9);
		assert_eq!(
			picker.fake_word(&mut rng, |word| word.contains('Z')),
			Err(PickError::AttemptsExhausted(50))
		);
	}
}
