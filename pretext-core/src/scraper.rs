//! Vocabulary scraper.
//!
//! A preliminary pass over the full input that harvests the grammar
//! vocabulary from BNF blocks: nonterminals (rule names on the left of the
//! defines operator) and keywords (every other bare identifier, minus
//! nonterminals, minus explicitly suppressed identifiers). The processor's
//! listing-configuration markers emit the result.

use crate::markers::{BLOCK_CLOSE, BLOCK_OPEN, BLOCK_OPEN_SUMMARY, NOT_A_KEYWORD};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

static DEFINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9A-Za-z_]+)\s*::=").unwrap());
static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][0-9A-Za-z_]+$").unwrap());
static NOT_A_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%not_a_keyword\s+([0-9A-Za-z_]+)").unwrap());

/// Token-classification rules for the keyword harvest.
#[derive(Debug, Clone)]
pub struct ScraperRules {
    /// Tokens ending in any of these are never keyword candidates.
    pub excluded_suffixes: Vec<String>,
    /// Minimum token length for a keyword candidate.
    pub min_token_length: usize,
}

impl Default for ScraperRules {
    fn default() -> Self {
        Self {
            excluded_suffixes: vec!["_name".to_string(), "_text".to_string()],
            min_token_length: 2,
        }
    }
}

/// The scraped grammar vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    /// Rule names, in order of first appearance in the input.
    pub nonterminals: Vec<String>,
    /// Keyword candidates minus nonterminals and suppressed identifiers,
    /// deduplicated and sorted lexicographically.
    pub keywords: Vec<String>,
}

/// A bare identifier: a letter followed by at least one more
/// letter/digit/underscore character.
pub fn is_identifier_like(token: &str) -> bool {
    IDENTIFIER_RE.is_match(token)
}

/// Whether the token carries one of the excluded suffixes.
pub fn has_excluded_suffix(token: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|suffix| token.ends_with(suffix.as_str()))
}

/// Walk the input once and build the [`Vocabulary`].
///
/// Blocks are delimited by the open/close markers; the summary-start
/// variant also opens a block and relies on the regular close marker.
/// `%%not_a_keyword` lines are honored wherever they appear.
pub fn scrape(input: &str, rules: &ScraperRules) -> Vocabulary {
    let mut nonterminals: Vec<String> = Vec::new();
    let mut candidates: BTreeSet<String> = BTreeSet::new();
    let mut suppressed: BTreeSet<String> = BTreeSet::new();
    let mut within_block = false;

    for line in input.lines() {
        let key = line.trim();
        if key.starts_with(NOT_A_KEYWORD) {
            if let Some(caps) = NOT_A_KEYWORD_RE.captures(key) {
                suppressed.insert(caps[1].to_string());
            }
        }
        if !within_block {
            if key == BLOCK_OPEN || key == BLOCK_OPEN_SUMMARY {
                within_block = true;
            }
        } else if key == BLOCK_CLOSE {
            within_block = false;
        } else {
            if let Some(caps) = DEFINES_RE.captures(key) {
                nonterminals.push(caps[1].to_string());
            }
            for token in key.split_whitespace() {
                if token.chars().count() < rules.min_token_length {
                    continue;
                }
                if has_excluded_suffix(token, &rules.excluded_suffixes) {
                    continue;
                }
                if !is_identifier_like(token) {
                    continue;
                }
                candidates.insert(token.to_string());
            }
        }
    }

    let defined: BTreeSet<&str> = nonterminals.iter().map(String::as_str).collect();
    let keywords = candidates
        .into_iter()
        .filter(|token| !defined.contains(token.as_str()) && !suppressed.contains(token))
        .collect();

    Vocabulary {
        nonterminals,
        keywords,
    }
}
