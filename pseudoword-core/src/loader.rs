use std::path::Path;

use log::info;

use crate::config::GeneratorConfig;
use crate::error::LoadError;
use crate::io::{dictionary_name, read_text};
use crate::model::generator::PseudowordGenerator;

/// One dictionary line: a word and its (possibly empty) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
	pub word: String,
	pub definition: String,
}

/// Splits a dictionary line into word and definition.
///
/// The word runs up to the first whitespace; the rest of the line, trimmed,
/// is the definition. Returns `None` for blank lines.
pub fn parse_entry(line: &str) -> Option<DictionaryEntry> {
	let line = line.trim();
	if line.is_empty() {
		return None;
	}

	let (word, definition) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
	Some(DictionaryEntry {
		word: word.to_owned(),
		definition: definition.trim().to_owned(),
	})
}

/// A loaded word list together with the generator trained on it.
///
/// # Responsibilities
/// - Parse dictionary lines (`WORD definition...`)
/// - Train a [`PseudowordGenerator`] on every word and compile it
/// - Keep the entries for callers that hand out real words
///
/// The generator is compiled by the time a `Dictionary` exists.
#[derive(Debug, Clone)]
pub struct Dictionary {
	name: String,
	entries: Vec<DictionaryEntry>,
	generator: PseudowordGenerator,
}

impl Dictionary {
	/// Loads a dictionary file; its name is the file stem.
	///
	/// # Errors
	/// - Returns an error if the file cannot be read.
	/// - Returns an error naming the 1-based line of the first untrainable word.
	pub fn load<P: AsRef<Path>>(path: P, config: &GeneratorConfig) -> Result<Self, LoadError> {
		let name = dictionary_name(&path)?;
		let text = read_text(&path)?;
		Self::from_text(&name, &text, config)
	}

	/// Builds a dictionary from in-memory text.
	///
	/// # Errors
	/// Same as [`from_lines`](Self::from_lines).
	pub fn from_text(name: &str, text: &str, config: &GeneratorConfig) -> Result<Self, LoadError> {
		Self::from_lines(name, text.lines(), config)
	}

	/// Trains a generator on every non-blank line and compiles it.
	///
	/// # Errors
	/// - Returns an error if the configuration is invalid.
	/// - Returns an error at the first word the generator rejects; nothing
	///   from the partial load is kept.
	pub fn from_lines<I, S>(name: &str, lines: I, config: &GeneratorConfig) -> Result<Self, LoadError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut generator = PseudowordGenerator::new(config)?;
		let mut entries = Vec::new();

		for (index, line) in lines.into_iter().enumerate() {
			let Some(entry) = parse_entry(line.as_ref()) else {
				continue;
			};

			generator.train(&entry.word).map_err(|source| LoadError::BadWord {
				line: index + 1,
				word: entry.word.clone(),
				source,
			})?;
			entries.push(entry);
		}

		info!("Loaded {} entries from dictionary '{}'", entries.len(), name);
		generator.compile();

		Ok(Self {
			name: name.to_owned(),
			entries,
			generator,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Entries in file order.
	pub fn entries(&self) -> &[DictionaryEntry] {
		&self.entries
	}

	/// The compiled generator.
	pub fn generator(&self) -> &PseudowordGenerator {
		&self.generator
	}

	pub fn into_parts(self) -> (Vec<DictionaryEntry>, PseudowordGenerator) {
		(self.entries, self.generator)
	}
}
