use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

use pseudoword_core::config::{DEFAULT_ALPHABET, DEFAULT_CONTEXT_ORDER};
use pseudoword_core::picker::default_indexes;
use pseudoword_core::{Dictionary, GeneratorConfig, PickError, PickerConfig, WordPicker};

const DEFAULT_COUNT: usize = 10;
const MAX_COUNT: usize = 40;
const DEFAULT_FROM: usize = 2;
const DEFAULT_TO: usize = 8;

/// Word game backend serving real and invented words
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Dictionary file, one `WORD definition` entry per line
	#[arg(short, long)]
	dictionary: PathBuf,

	/// Letters a word may use
	#[arg(long, default_value = DEFAULT_ALPHABET)]
	alphabet: String,

	/// Number of preceding letters a transition depends on
	#[arg(long, default_value_t = DEFAULT_CONTEXT_ORDER)]
	order: usize,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Generation attempts before a request gives up
	#[arg(long, default_value_t = 10_000)]
	max_attempts: usize,
}

/// Query parameters for `/v1/words`
#[derive(Deserialize)]
struct LengthParams {
	count: Option<usize>,
	from: Option<usize>,
	to: Option<usize>,
}

/// Query parameters for `/v1/words/index/{name}`
#[derive(Deserialize)]
struct CountParams {
	count: Option<usize>,
}

/// Query parameters for `/v1/generate`
#[derive(Deserialize)]
struct GenerateParams {
	pattern: Option<String>,
}

#[derive(Serialize)]
struct IndexSummary<'a> {
	name: &'a str,
	title: &'a str,
}

fn clamp_count(count: Option<usize>) -> usize {
	count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT)
}

fn pick_failure(e: PickError) -> HttpResponse {
	match e {
		PickError::UnknownIndex(name) => HttpResponse::NotFound().body(format!("Unknown word index '{name}'")),
		e => {
			error!("{e}");
			HttpResponse::InternalServerError().body("could not produce a word")
		}
	}
}

/// HTTP GET endpoint `/v1/words`
///
/// Returns a JSON list mixing real and invented words with a length in `from..=to`.
#[get("/v1/words")]
async fn get_words(picker: web::Data<WordPicker>, query: web::Query<LengthParams>) -> impl Responder {
	let count = clamp_count(query.count);
	let from = query.from.unwrap_or(DEFAULT_FROM);
	let to = query.to.unwrap_or(DEFAULT_TO);

	match picker.words_by_length(&mut rand::rng(), from, to, count) {
		Ok(words) => HttpResponse::Ok().json(words),
		Err(e) => pick_failure(e),
	}
}

/// HTTP GET endpoint `/v1/words/index/{name}`
///
/// Returns a JSON list of real and invented words belonging to the named index.
#[get("/v1/words/index/{name}")]
async fn get_index_words(
	picker: web::Data<WordPicker>,
	name: web::Path<String>,
	query: web::Query<CountParams>,
) -> impl Responder {
	let count = clamp_count(query.count);

	match picker.words_from_index(&mut rand::rng(), &name, count) {
		Ok(words) => HttpResponse::Ok().json(words),
		Err(e) => pick_failure(e),
	}
}

#[get("/v1/indexes")]
async fn get_indexes(picker: web::Data<WordPicker>) -> impl Responder {
	let summaries: Vec<IndexSummary> = picker
		.indexes()
		.map(|index| IndexSummary { name: index.name(), title: index.title() })
		.collect();
	HttpResponse::Ok().json(summaries)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns a single pseudoword as plain text, optionally matching `pattern`
/// on the whole word.
#[get("/v1/generate")]
async fn get_generated(picker: web::Data<WordPicker>, query: web::Query<GenerateParams>) -> impl Responder {
	let pattern = match &query.pattern {
		Some(p) => match Regex::new(&format!("^(?:{p})$")) {
			Ok(r) => Some(r),
			Err(e) => return HttpResponse::BadRequest().body(format!("Invalid pattern: {e}")),
		},
		None => None,
	};

	let result = picker.fake_word(&mut rand::rng(), |word| {
		pattern.as_ref().is_none_or(|r| r.is_match(word))
	});
	match result {
		Ok(word) => HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(word),
		Err(e) => pick_failure(e),
	}
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_words)
		.service(get_index_words)
		.service(get_indexes)
		.service(get_generated);
}

fn build_picker(args: &Args) -> Result<WordPicker, Box<dyn std::error::Error>> {
	let config = GeneratorConfig::new(&args.alphabet, args.order)?;
	let dictionary = Dictionary::load(&args.dictionary, &config)?;

	let mut picker_config = PickerConfig::default();
	picker_config.set_max_attempts(args.max_attempts)?;

	Ok(WordPicker::new(dictionary, default_indexes()?, picker_config))
}

/// Main entry point for the server.
///
/// Loads the dictionary once, then serves it read-only from every worker.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let picker = web::Data::from(Arc::new(build_picker(&args)?));
	info!("Serving on {}:{}", args.host, args.port);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(picker.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}
