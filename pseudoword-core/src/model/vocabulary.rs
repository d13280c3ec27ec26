use std::collections::HashSet;

/// Set of words a generator was trained on.
///
/// Membership only; insertion order is not kept. Words are never removed.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
	words: HashSet<String>,
}

impl Vocabulary {
	/// Creates an empty vocabulary sized for `expected_size` words.
	pub fn with_capacity(expected_size: usize) -> Self {
		Self { words: HashSet::with_capacity(expected_size) }
	}

	/// Adds a word. Returns false if it was already present.
	pub fn insert(&mut self, word: &str) -> bool {
		if self.words.contains(word) {
			return false;
		}
		self.words.insert(word.to_owned())
	}

	/// Exact, case-sensitive membership test.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}
