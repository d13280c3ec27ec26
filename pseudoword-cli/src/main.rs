use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;

use pseudoword_core::config::{DEFAULT_ALPHABET, DEFAULT_CONTEXT_ORDER};
use pseudoword_core::{DeadStateError, Dictionary, GeneratorConfig, PseudowordGenerator};

/// Invent words that look like they belong to a dictionary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How many pseudowords to print
    num_words: usize,

    /// Dictionary file, one `WORD definition` entry per line
    dictionary: PathBuf,

    /// Regular expression every printed word must match entirely
    criteria: Option<String>,

    /// Letters a word may use
    #[arg(long, default_value = DEFAULT_ALPHABET)]
    alphabet: String,

    /// Number of preceding letters a transition depends on
    #[arg(long, default_value_t = DEFAULT_CONTEXT_ORDER)]
    order: usize,

    /// Seed for reproducible output; worker `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,
}

/// Splits `total` into `parts` near-equal shares, larger shares first.
fn shares(total: usize, parts: usize) -> Vec<usize> {
    let base = total / parts;
    let extra = total % parts;
    (0..parts).map(|i| base + usize::from(i < extra)).collect()
}

/// Generates `count` words on the calling thread.
fn generate_share(
    generator: &PseudowordGenerator,
    criteria: Option<&Regex>,
    rng: &mut StdRng,
    count: usize,
) -> Result<Vec<String>, DeadStateError> {
    (0..count)
        .map(|_| generator.generate_matching(rng, |word| criteria.is_none_or(|r| r.is_match(word))))
        .collect()
}

/// Generates `num_words` words over `threads` workers, concatenated in worker order.
fn generate_all(
    generator: &PseudowordGenerator,
    criteria: Option<&Regex>,
    num_words: usize,
    threads: usize,
    seed: Option<u64>,
) -> Result<Vec<String>, DeadStateError> {
    let shares = shares(num_words, threads.max(1));

    thread::scope(|scope| {
        let handles: Vec<_> = shares
            .into_iter()
            .enumerate()
            .map(|(worker, count)| {
                scope.spawn(move || {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
                        None => StdRng::from_os_rng(),
                    };
                    generate_share(generator, criteria, &mut rng, count)
                })
            })
            .collect();

        let mut words = Vec::with_capacity(num_words);
        for handle in handles {
            match handle.join() {
                Ok(share) => words.extend(share?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(words)
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let criteria = args
        .criteria
        .as_deref()
        .map(|pattern| Regex::new(&format!("^(?:{pattern})$")))
        .transpose()?;

    let config = GeneratorConfig::new(&args.alphabet, args.order)?;
    let dictionary = Dictionary::load(&args.dictionary, &config)?;
    info!("Loaded {} words from '{}'", dictionary.entries().len(), dictionary.name());

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    let words = generate_all(dictionary.generator(), criteria.as_ref(), args.num_words, threads, args.seed)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for word in words {
        writeln!(out, "{word}")?;
    }
    out.flush()?;

    Ok(())
}
