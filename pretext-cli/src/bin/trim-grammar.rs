//! Trim embedded host-language code from a Bison grammar file so the
//! result can be diffed against the spec's grammar appendix.

use clap::{Arg, ArgAction, Command};
use pretext_config::Loader;
use pretext_grammar::{trim_grammar, RuleSyntax, TrimOptions};
use std::fs;
use std::process::exit;

fn main() {
    let matches = Command::new("trim-grammar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trim code blocks and noise from a grammar file")
        .arg(
            Arg::new("filename")
                .help("Path to the grammar file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("remove-comments")
                .long("remove-comments")
                .short('c')
                .help("Also strip // and /* ... */ comments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration layered over the built-in defaults"),
        )
        .get_matches();

    let mut loader = Loader::new().with_project_file();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("remove-comments") {
        loader = loader
            .set_override("trim.remove_comments", true)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                exit(1);
            });
    }
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        exit(1);
    });

    let path = matches.get_one::<String>("filename").expect("required");
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        exit(1);
    });

    let options = TrimOptions {
        remove_comments: config.trim.remove_comments,
        syntax: RuleSyntax {
            indent: config.trim.indent.clone(),
            ..RuleSyntax::default()
        },
    };

    match trim_grammar(&source, &options) {
        Ok(trimmed) => print!("{}", trimmed),
        Err(e) => {
            eprintln!("Error trimming {}: {}", path, e);
            exit(1);
        }
    }
}
