use std::collections::HashSet;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;

use pseudoword_core::config::DEFAULT_ALPHABET;
use pseudoword_core::{ConfigurationError, DeadStateError, GeneratorConfig, PseudowordGenerator, TrainError};

/// Alphabet "ABDE": A=0, B=1, D=2, E=3, END column 4, boundary digit 4.
fn small_generator() -> PseudowordGenerator {
	PseudowordGenerator::with_alphabet("ABDE", 2).unwrap()
}

fn nonzero_cells(generator: &PseudowordGenerator) -> Vec<(usize, usize, u64)> {
	let table = generator.table();
	let mut cells = Vec::new();
	for row in 0..table.num_rows() {
		for (column, &count) in table.row_counts(row).iter().enumerate() {
			if count > 0 {
				cells.push((row, column, count));
			}
		}
	}
	cells
}

#[test]
fn table_dimensions_follow_alphabet_and_order() {
	for (alphabet, order, rows) in [("ABDE", 1, 5), ("ABDE", 2, 25), ("ABDE", 3, 125), ("AB", 4, 81)] {
		let generator = PseudowordGenerator::with_alphabet(alphabet, order).unwrap();
		assert_eq!(generator.table().num_rows(), rows);
		assert_eq!(generator.table().num_columns(), alphabet.len() + 1);
		assert_eq!(generator.context_order(), order);
	}

	let generator = PseudowordGenerator::new(&GeneratorConfig::default()).unwrap();
	assert_eq!(generator.table().num_rows(), 729);
	assert_eq!(generator.table().num_columns(), 27);
}

#[test]
fn oversized_orders_are_refused_before_allocating() {
	for order in [5, 12, 13] {
		assert_eq!(
			PseudowordGenerator::with_alphabet(DEFAULT_ALPHABET, order).unwrap_err(),
			ConfigurationError::StateSpaceTooLarge { alphabet_size: 26, order }
		);
	}
	assert!(PseudowordGenerator::with_alphabet(DEFAULT_ALPHABET, 4).is_ok());
}

#[test]
fn training_ae_sets_exactly_three_cells() {
	let mut generator = small_generator();
	generator.train("AE").unwrap();

	// (^,^)->A, (^,A)->E, (A,E)->$
	assert_eq!(nonzero_cells(&generator), vec![(3, 4, 1), (20, 3, 1), (24, 0, 1)]);
}

#[test]
fn training_bade_traces_the_window() {
	let mut generator = small_generator();
	generator.train("BADE").unwrap();

	// (^,^)->B, (^,B)->A, (B,A)->D, (A,D)->E, (D,E)->$
	assert_eq!(
		nonzero_cells(&generator),
		vec![(2, 3, 1), (5, 2, 1), (13, 4, 1), (21, 0, 1), (24, 1, 1)]
	);
}

#[test]
fn training_several_words_accumulates() {
	let mut generator = small_generator();
	for word in ["AE", "BADE", "BEAB"] {
		generator.train(word).unwrap();
	}
	let table = generator.table();
	assert_eq!(table.total_observations(), 3 + 5 + 5);
	// Both BADE and BEAB start with B
	assert_eq!(table.count(24, 1), 2);
	assert_eq!(table.count(24, 0), 1);
}

#[test]
fn invalid_words_are_refused() {
	let mut generator = PseudowordGenerator::new(&GeneratorConfig::default()).unwrap();
	assert_eq!(generator.train(""), Err(TrainError::Empty));
	assert_eq!(
		generator.train("TIC-TAC"),
		Err(TrainError::IllegalCharacter { character: '-', position: 3 })
	);
	assert_eq!(
		generator.train("opera"),
		Err(TrainError::IllegalCharacter { character: 'o', position: 0 })
	);
	assert!(!generator.is_trained_word("TIC-TAC"));
	assert_eq!(generator.table().total_observations(), 0);

	generator.train("OPERA").unwrap();
	assert!(generator.is_trained_word("OPERA"));
	assert!(!generator.is_trained_word("OPERAS"));
}

#[test]
fn generated_words_follow_the_only_learned_pattern() {
	// Only words shaped like BEA(EA)*D can come out, and BEAEAD itself is excluded.
	let mut generator = small_generator();
	generator.train("BEAEAD").unwrap();
	generator.compile();
	let shape = Regex::new("^BEA(EA)*D$").unwrap();

	let mut rng = StdRng::seed_from_u64(2011);
	for _ in 0..200 {
		let word = generator.generate(&mut rng).unwrap();
		assert!(shape.is_match(&word), "unexpected shape: {word}");
		assert_ne!(word, "BEAEAD");
		assert_eq!(word.len() % 2, 0);
	}
}

#[test]
fn generate_never_returns_a_trained_word() {
	let vocabulary = ["BAD", "BED", "BEAD", "DAB", "ABED", "BADE", "DEAD", "BEADED", "ADD", "EBB"];
	let mut generator = small_generator();
	for word in vocabulary {
		generator.train(word).unwrap();
	}
	generator.compile();

	let mut rng = StdRng::seed_from_u64(42);
	for _ in 0..500 {
		let word = generator.generate(&mut rng).unwrap();
		assert!(!vocabulary.contains(&word.as_str()), "returned trained word {word}");
		assert!(!word.is_empty());
		assert!(word.chars().all(|c| "ABDE".contains(c)));
	}
}

#[test]
fn generate_matching_honours_the_predicate() {
	let vocabulary = ["BAD", "BED", "BEAD", "DAB", "ABED", "BADE", "DEAD", "BEADED", "ADD", "EBB"];
	let mut generator = small_generator();
	for word in vocabulary {
		generator.train(word).unwrap();
	}
	generator.compile();
	let pattern = Regex::new("^B.*D$").unwrap();

	let mut rng = StdRng::seed_from_u64(7);
	for _ in 0..200 {
		let word = generator.generate_matching(&mut rng, |w| pattern.is_match(w)).unwrap();
		assert!(pattern.is_match(&word), "{word} fails the predicate");
		assert!(!generator.is_trained_word(&word));
	}
}

#[test]
fn seeded_generation_is_reproducible() {
	let mut generator = small_generator();
	for word in ["BAD", "BED", "BEAD", "DAB", "ABED", "BADE", "DEAD"] {
		generator.train(word).unwrap();
	}
	generator.compile();

	let run = |seed| {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..20).map(|_| generator.generate(&mut rng).unwrap()).collect::<Vec<_>>()
	};
	assert_eq!(run(99), run(99));
}

#[test]
fn dead_context_is_reported_not_invented() {
	let mut generator = small_generator();
	generator.train("BEAD").unwrap();
	let mut rng = StdRng::seed_from_u64(1);

	// Not compiled yet: the start row has no distribution
	assert_eq!(generator.generate(&mut rng), Err(DeadStateError { row: 24 }));
	assert_eq!(
		generator.generate_matching(&mut rng, |_| true),
		Err(DeadStateError { row: 24 })
	);

	generator.compile();
	assert!(generator.sample_candidate(&mut rng).is_ok());
}

#[test]
fn higher_orders_work_without_changes() {
	let mut generator = PseudowordGenerator::with_alphabet("ABDE", 3).unwrap();
	for word in ["BEADED", "BEADEDBED", "DEADBEAD", "ABED"] {
		generator.train(word).unwrap();
	}
	generator.compile();
	let mut rng = StdRng::seed_from_u64(3);
	for _ in 0..50 {
		let word = generator.generate(&mut rng).unwrap();
		assert!(!generator.is_trained_word(&word));
	}
}

#[test]
fn compiled_generator_is_shared_across_threads() {
	let mut generator = small_generator();
	for word in ["BAD", "BED", "BEAD", "DAB", "ABED", "BADE", "DEAD", "BEADED"] {
		generator.train(word).unwrap();
	}
	generator.compile();
	let generator = &generator;

	let words: HashSet<String> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|worker| {
				scope.spawn(move || {
					let mut rng = StdRng::seed_from_u64(worker);
					(0..25).map(|_| generator.generate(&mut rng).unwrap()).collect::<Vec<_>>()
				})
			})
			.collect();
		handles.into_iter().flat_map(|handle| handle.join().unwrap()).collect()
	});

	assert!(!words.is_empty());
	assert!(words.iter().all(|word| !generator.is_trained_word(word)));
}
