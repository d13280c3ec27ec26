use crate::error::DeadStateError;

/// Dense `rows x columns` matrix of letter transitions.
///
/// A row is a context window, a column is the next symbol (letters first,
/// end-of-word last). The table keeps two layers:
/// - `counts`: exact number of times each transition was observed
/// - `cumulative`: per-row cumulative distribution, rebuilt by [`compile`](Self::compile)
///
/// Conceptually each row is a node of a Markov chain whose outgoing edges
/// are weighted by their number of observations.
///
/// # Invariants
/// - both layers hold exactly `num_rows * num_columns` cells
/// - after `compile`, every row is either all zero (dead) or non-decreasing
///   with its last cell equal to 1.0
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
	num_rows: usize,
	num_columns: usize,
	counts: Vec<u64>,
	cumulative: Vec<f64>,
}

impl TransitionTable {
	/// Creates an all-zero table.
	pub fn new(num_rows: usize, num_columns: usize) -> Self {
		let cells = num_rows * num_columns;
		Self {
			num_rows,
			num_columns,
			counts: vec![0; cells],
			cumulative: vec![0.0; cells],
		}
	}

	/// Creates an uncompiled table from a row-major count matrix.
	///
	/// Returns `None` if there are no columns or if `counts` does not hold
	/// exactly `num_rows * num_columns` cells.
	pub fn from_counts(num_rows: usize, num_columns: usize, counts: Vec<u64>) -> Option<Self> {
		if num_columns == 0 || num_rows.checked_mul(num_columns)? != counts.len() {
			return None;
		}
		Some(Self {
			num_rows,
			num_columns,
			cumulative: vec![0.0; counts.len()],
			counts,
		})
	}

	pub fn num_rows(&self) -> usize {
		self.num_rows
	}

	pub fn num_columns(&self) -> usize {
		self.num_columns
	}

	/// Records one observation of `row -> column`.
	pub fn record(&mut self, row: usize, column: usize) {
		let cell = self.cell(row, column);
		self.counts[cell] += 1;
	}

	/// Observation count of `row -> column`.
	pub fn count(&self, row: usize, column: usize) -> u64 {
		self.counts[self.cell(row, column)]
	}

	/// Observation counts of one row.
	pub fn row_counts(&self, row: usize) -> &[u64] {
		let start = row * self.num_columns;
		&self.counts[start..start + self.num_columns]
	}

	/// Cumulative distribution of one row, as of the last `compile`.
	pub fn cumulative_row(&self, row: usize) -> &[f64] {
		let start = row * self.num_columns;
		&self.cumulative[start..start + self.num_columns]
	}

	/// Total number of observations recorded.
	pub fn total_observations(&self) -> u64 {
		self.counts.iter().sum()
	}

	/// Rebuilds the cumulative layer from the counts.
	///
	/// Column `j` of a row becomes `(c0 + ... + cj) / S` where `S` is the row
	/// total. Rows without observations stay all zero. Calling this twice
	/// yields the same table.
	pub fn compile(&mut self) {
		for (counts, cumulative) in self
			.counts
			.chunks_exact(self.num_columns)
			.zip(self.cumulative.chunks_exact_mut(self.num_columns))
		{
			let total: u64 = counts.iter().sum();
			if total == 0 {
				cumulative.fill(0.0);
				continue;
			}

			let mut running: u64 = 0;
			for (count, probability) in counts.iter().zip(cumulative.iter_mut()) {
				running += count;
				*probability = running as f64 / total as f64;
			}
		}
	}

	/// Whether `row` has no outgoing transitions in the compiled layer.
	pub fn is_dead(&self, row: usize) -> bool {
		Self::last_live_column(self.cumulative_row(row)).is_none()
	}

	/// Picks the next column of `row` for a uniform draw `u` in `(0, 1)`.
	///
	/// This method performs an O(columns) scan and returns the first column
	/// whose cumulative value reaches `u`. If drift leaves `u` above every
	/// tabulated value, the last column with a nonzero probability is used
	/// instead.
	///
	/// # Errors
	/// Returns [`DeadStateError`] if the row has no observed transitions.
	pub fn sample(&self, row: usize, u: f64) -> Result<usize, DeadStateError> {
		let cumulative = self.cumulative_row(row);
		let fallback = Self::last_live_column(cumulative).ok_or(DeadStateError { row })?;

		Ok(cumulative
			.iter()
			.position(|&probability| probability > 0.0 && probability >= u)
			.unwrap_or(fallback))
	}

	/// Last column whose cumulative value rises above its predecessor.
	fn last_live_column(cumulative: &[f64]) -> Option<usize> {
		(0..cumulative.len()).rev().find(|&column| {
			let previous = if column == 0 { 0.0 } else { cumulative[column - 1] };
			cumulative[column] > previous
		})
	}

	fn cell(&self, row: usize, column: usize) -> usize {
		debug_assert!(row < self.num_rows && column < self.num_columns);
		row * self.num_columns + column
	}
}
