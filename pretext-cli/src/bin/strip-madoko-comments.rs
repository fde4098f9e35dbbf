//! Drop madoko region comment lines (`// BEGIN:` / `// END:`) from the
//! listed files, or from stdin when none are given.

use clap::{Arg, Command};
use pretext_grammar::comments::strip_madoko_comments;
use std::process::exit;
use std::{fs, io};

fn main() {
    let matches = Command::new("strip-madoko-comments")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Remove madoko region comment lines from source excerpts")
        .arg(Arg::new("files").help("Input files (default: stdin)").num_args(0..))
        .get_matches();

    let input = read_input(matches.get_many::<String>("files"));
    print!("{}", strip_madoko_comments(&input));
}

fn read_input(files: Option<clap::parser::ValuesRef<'_, String>>) -> String {
    match files {
        Some(paths) => {
            let mut input = String::new();
            for path in paths {
                match fs::read_to_string(path) {
                    Ok(source) => input.push_str(&source),
                    Err(e) => {
                        eprintln!("Error reading {}: {}", path, e);
                        exit(1);
                    }
                }
            }
            input
        }
        None => io::read_to_string(io::stdin()).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            exit(1);
        }),
    }
}
