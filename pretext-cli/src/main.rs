//! Tag-driven preprocessor for spec document sources.
//!
//! Usage:
//!   pretext <source>... [-o <output>]        - Expand markers into LaTeX
//!   pretext <source>... --vocab-json <path>  - Also dump the scraped vocabulary

use clap::{Arg, Command};
use pretext_config::{Loader, PretextConfig};
use pretext_core::processor::{process, ProcessorOptions};
use pretext_core::scraper::{scrape, ScraperRules};
use std::fs;
use std::io::{self, Write};
use std::process::exit;

fn main() {
    let matches = Command::new("pretext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand preprocessing tags in spec document sources into LaTeX")
        .arg(
            Arg::new("sources")
                .help("Source files, concatenated in argument order")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file to generate (default: stdout)"),
        )
        .arg(
            Arg::new("vocab-json")
                .long("vocab-json")
                .help("Also write the scraped vocabulary as JSON to this path"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration layered over the built-in defaults"),
        )
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));

    let mut input = String::new();
    for path in matches.get_many::<String>("sources").expect("required") {
        let source = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            exit(1);
        });
        input.push_str(&source);
    }

    let rules = ScraperRules {
        excluded_suffixes: config.scraper.excluded_suffixes.clone(),
        min_token_length: config.scraper.min_token_length,
    };
    let vocabulary = scrape(&input, &rules);

    if let Some(path) = matches.get_one::<String>("vocab-json") {
        let json = serde_json::to_string_pretty(&vocabulary).unwrap_or_else(|e| {
            eprintln!("Error serializing vocabulary: {}", e);
            exit(1);
        });
        if let Err(e) = fs::write(path, json) {
            eprintln!("Error writing {}: {}", path, e);
            exit(1);
        }
    }

    let options = ProcessorOptions {
        comment_sentinel: config.processor.comment_sentinel.clone(),
        clear_on_deposit: config.processor.clear_on_deposit,
    };

    let mut out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => {
            let file = fs::File::create(path).unwrap_or_else(|e| {
                eprintln!("Error creating {}: {}", path, e);
                exit(1);
            });
            Box::new(io::BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    if let Err(e) = process(&input, &vocabulary, options, &mut out) {
        eprintln!("Processing error: {}", e);
        exit(1);
    }
    if let Err(e) = out.flush() {
        eprintln!("Error writing output: {}", e);
        exit(1);
    }
}

fn load_config(path: Option<&String>) -> PretextConfig {
    let mut loader = Loader::new().with_project_file();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        exit(1);
    })
}
