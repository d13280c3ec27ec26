use std::mem::size_of;

use crate::error::ConfigurationError;

/// Largest transition table accepted, in cells (4 GiB of counts and cumulatives).
pub const MAX_TABLE_CELLS: usize = 1 << 28;

/// Rolling window over the last `order` symbols of a word.
///
/// Each slot holds one base-`(A + 1)` digit: a letter index `0..A`, or the
/// boundary digit `A` standing for the start (or end) of the word. The
/// oldest slot is the most significant digit, so the window maps onto a
/// transition table row by plain positional arithmetic:
///
/// `row = sum(digit[i] * (A + 1)^(order - 1 - i))`
///
/// The all-boundary window (a fresh word) is therefore row `(A + 1)^order - 1`,
/// not row 0: the boundary is the highest digit rather than the lowest, so
/// letter `i` keeps digit `i` in every slot.
///
/// # Invariants
/// - `slots.len() == order` at all times
/// - every slot is `<= A`, so `row_index() < num_rows()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEncoder {
	/// Oldest first.
	slots: Vec<usize>,
	alphabet_size: usize,
	num_rows: usize,
}

impl ContextEncoder {
	/// Creates an encoder of the given order for an alphabet of `alphabet_size`
	/// letters, positioned at the start of a word.
	///
	/// # Errors
	/// Returns an error if `order` is zero, the alphabet is empty, or the
	/// table `(A + 1)^order x (A + 1)` exceeds [`MAX_TABLE_CELLS`] or could
	/// not be allocated.
	pub fn new(alphabet_size: usize, order: usize) -> Result<Self, ConfigurationError> {
		if order == 0 {
			return Err(ConfigurationError::InvalidContextOrder);
		}
		if alphabet_size == 0 {
			return Err(ConfigurationError::EmptyAlphabet);
		}

		let too_large = ConfigurationError::StateSpaceTooLarge { alphabet_size, order };
		let radix = alphabet_size.checked_add(1).ok_or(too_large.clone())?;
		let exponent = u32::try_from(order).map_err(|_| too_large.clone())?;
		let num_rows = radix.checked_pow(exponent).ok_or(too_large.clone())?;
		// Counts and cumulatives are allocated side by side
		let cells = num_rows.checked_mul(radix).ok_or(too_large.clone())?;
		let bytes = cells
			.checked_mul(size_of::<u64>() + size_of::<f64>())
			.ok_or(too_large.clone())?;
		if cells > MAX_TABLE_CELLS || bytes > isize::MAX as usize {
			return Err(too_large);
		}

		Ok(Self {
			slots: vec![alphabet_size; order],
			alphabet_size,
			num_rows,
		})
	}

	/// Number of slots (K).
	pub fn order(&self) -> usize {
		self.slots.len()
	}

	/// Number of distinct windows, `(A + 1)^K`.
	pub fn num_rows(&self) -> usize {
		self.num_rows
	}

	/// Number of possible next symbols, `A + 1`.
	pub fn num_columns(&self) -> usize {
		self.alphabet_size + 1
	}

	/// Column reserved for the end of a word.
	pub fn end_column(&self) -> usize {
		self.alphabet_size
	}

	/// Digit used for the word boundary in a slot.
	pub fn boundary_digit(&self) -> usize {
		self.alphabet_size
	}

	/// Fills every slot with the start-of-word marker.
	pub fn reset(&mut self) {
		self.slots.fill(self.alphabet_size);
	}

	/// Shifts the window by one, appending `letter` as the newest slot.
	///
	/// `letter` must be a valid alphabet index.
	pub fn advance(&mut self, letter: usize) {
		debug_assert!(letter < self.alphabet_size, "letter index {letter} out of alphabet");
		self.push(letter);
	}

	/// Shifts the window by one, appending the end-of-word marker.
	///
	/// The end marker shares the boundary digit with the start marker. A
	/// window ending on a boundary after a letter is never trained on.
	pub fn advance_to_end(&mut self) {
		self.push(self.alphabet_size);
	}

	fn push(&mut self, digit: usize) {
		self.slots.copy_within(1.., 0);
		if let Some(newest) = self.slots.last_mut() {
			*newest = digit;
		}
	}

	/// Transition table row of the current window.
	pub fn row_index(&self) -> usize {
		Self::encode(&self.slots, self.alphabet_size + 1)
	}

	/// Slot digits, oldest first.
	pub fn slots(&self) -> &[usize] {
		&self.slots
	}

	fn encode(digits: &[usize], radix: usize) -> usize {
		digits.iter().fold(0, |row, digit| row * radix + digit)
	}
}
