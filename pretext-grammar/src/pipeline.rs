//! The grammar trim pipeline.
//!
//! Stage order: skip the file preamble, mask quoted strings, erase
//! embedded action blocks, clean the lines (optional comment removal,
//! trailing whitespace, blank lines inside a definition), flatten,
//! reformat one alternative per line, restore the masked strings.

use crate::mask::{self, MaskError};
use crate::reformat::{self, ReformatError, RuleSyntax};
use crate::strip;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static RULE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^program\s*:|^p4program").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*$").unwrap());
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*.*\*/").unwrap());
static DEFN_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]").unwrap());
static DEFN_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+;").unwrap());

/// Options for one trim run.
#[derive(Debug, Clone, Default)]
pub struct TrimOptions {
    /// Also strip `//` and one-line `/* ... */` comments.
    pub remove_comments: bool,
    pub syntax: RuleSyntax,
}

/// Errors that can occur during a trim run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Mask(MaskError),
    Reformat(ReformatError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Mask(e) => write!(f, "masking error: {}", e),
            PipelineError::Reformat(e) => write!(f, "reformat error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<MaskError> for PipelineError {
    fn from(err: MaskError) -> Self {
        PipelineError::Mask(err)
    }
}

impl From<ReformatError> for PipelineError {
    fn from(err: ReformatError) -> Self {
        PipelineError::Reformat(err)
    }
}

/// Trim a grammar file for diffing against the spec's grammar appendix.
pub fn trim_grammar(source: &str, options: &TrimOptions) -> Result<String, PipelineError> {
    let kept = skip_preamble(source);
    let masked = mask::mask(&kept)?;
    let stripped = strip::normalize_literals(&strip::strip_braces(&masked));
    let cleaned = cleanup_lines(&stripped, options.remove_comments);
    let flattened = cleaned.replace('\n', " ");
    let reformatted = reformat::reformat(&flattened, &options.syntax)?;
    Ok(mask::restore(&reformatted))
}

/// Keep lines from the first rule onward (the grammar body starts at
/// `program :` or `p4program`); everything before is Bison boilerplate.
fn skip_preamble(source: &str) -> String {
    let mut kept = String::new();
    let mut keep = false;
    for line in source.split_inclusive('\n') {
        if !keep && RULE_START.is_match(line) {
            keep = true;
        }
        if keep {
            kept.push_str(line);
        }
    }
    kept
}

/// Per-line cleanup: optional comment removal, trailing-whitespace
/// removal, and dropping blank lines that fall inside the definition of
/// a nonterminal (between its name line and the `;` line).
fn cleanup_lines(text: &str, remove_comments: bool) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let mut line = line.to_string();
            if remove_comments {
                line = LINE_COMMENT.replace(&line, "").into_owned();
                line = BLOCK_COMMENT.replace_all(&line, "").into_owned();
            }
            line.trim_end().to_string()
        })
        .collect();

    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let starts_definition = DEFN_START.is_match(&lines[i]);
        result.push(lines[i].clone());
        i += 1;
        if starts_definition {
            while i < lines.len() {
                if DEFN_END.is_match(&lines[i]) {
                    result.push(lines[i].clone());
                    i += 1;
                    break;
                }
                if !lines[i].trim().is_empty() {
                    result.push(lines[i].clone());
                }
                i += 1;
            }
        }
    }
    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim(source: &str) -> Result<String, PipelineError> {
        trim_grammar(source, &TrimOptions::default())
    }

    #[test]
    fn trims_a_small_grammar() {
        let source = "\
%token NUMBER
program : statement { run(); } ;
statement : \"a\" \"b\" { act($1); } | \"c\" ;
";
        let out = trim(source).unwrap();
        assert_eq!(
            out,
            "\nprogram\n    : statement\n    ;\n\
             \nstatement\n    : \"a\" \"b\"\n    | \"c\"\n    ;\n"
        );
    }

    #[test]
    fn preamble_is_dropped() {
        let source = "junk { braces }\nmore junk\nprogram : x ;\n";
        let out = trim(source).unwrap();
        assert!(!out.contains("junk"));
        assert!(out.contains("\nprogram\n"));
    }

    #[test]
    fn braces_inside_strings_survive() {
        let source = "program : \"{\" body \"}\" ;\n";
        let out = trim(source).unwrap();
        assert_eq!(out, "\nprogram\n    : \"{\" body \"}\"\n    ;\n");
    }

    #[test]
    fn normalizes_sentinel_tokens() {
        let source = "program : l_angle type r_angle | %empty ;\n";
        let out = trim(source).unwrap();
        assert_eq!(
            out,
            "\nprogram\n    : \"<\" type \">\"\n    | /* empty */\n    ;\n"
        );
    }

    #[test]
    fn comments_are_kept_by_default_and_removed_on_request() {
        let source = "program : x /* note */ ;\n";
        let kept = trim(source).unwrap();
        assert!(kept.contains("/* note */"));

        let options = TrimOptions {
            remove_comments: true,
            ..TrimOptions::default()
        };
        let removed = trim_grammar(source, &options).unwrap();
        assert_eq!(removed, "\nprogram\n    : x\n    ;\n");
    }

    #[test]
    fn line_comments_are_removed_on_request() {
        let source = "program : x // trailing\n  | y ;\n";
        let options = TrimOptions {
            remove_comments: true,
            ..TrimOptions::default()
        };
        let out = trim_grammar(source, &options).unwrap();
        assert_eq!(out, "\nprogram\n    : x\n    | y\n    ;\n");
    }

    #[test]
    fn apostrophe_in_comment_is_accepted() {
        let out = trim("program : x // it's a rule\n  | y ;\n").unwrap();
        assert_eq!(out, "\nprogram\n    : x // it's a rule\n    | y\n    ;\n");
    }

    #[test]
    fn char_literal_tokens_survive_trimming() {
        let out = trim("program : '{' body '}' ;\n").unwrap();
        assert_eq!(out, "\nprogram\n    : '{' body '}'\n    ;\n");
    }

    #[test]
    fn unterminated_quote_is_a_pipeline_error() {
        let err = trim("program : \"oops ;\n").unwrap_err();
        assert!(matches!(err, PipelineError::Mask(_)));
    }

    #[test]
    fn malformed_rule_is_a_pipeline_error() {
        let err = trim("program : x ; stray\n").unwrap_err();
        assert!(matches!(err, PipelineError::Reformat(_)));
    }
}
