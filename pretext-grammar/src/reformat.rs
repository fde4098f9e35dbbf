//! Rule reformatting.
//!
//! Consumes the stripped, flattened grammar text (newlines collapsed to
//! spaces) and re-emits every rule with one alternative per line:
//!
//! ```text
//!
//! name
//!     : first alternative
//!     | second alternative
//!     ;
//! ```
//!
//! Operates on masked text, so the separator characters are guaranteed
//! structural.

use std::fmt;

/// Tokens delimiting rule structure, plus the emitted indent.
#[derive(Debug, Clone)]
pub struct RuleSyntax {
    /// Separates the rule name from its body; also the first
    /// alternative's line marker.
    pub defines: char,
    /// Separates alternatives; marker for every alternative after the
    /// first.
    pub alternative: char,
    /// Ends a rule.
    pub terminator: char,
    /// Prefix of every marker line.
    pub indent: String,
}

impl Default for RuleSyntax {
    fn default() -> Self {
        Self {
            defines: ':',
            alternative: '|',
            terminator: ';',
            indent: "    ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReformatError {
    /// Rule text at position `index` (in order of appearance) does not
    /// split into a name part and a body part at the defines token.
    MalformedRule { index: usize, text: String },
}

impl fmt::Display for ReformatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReformatError::MalformedRule { index, text } => {
                write!(f, "malformed rule at position {}: {:?}", index, text)
            }
        }
    }
}

impl std::error::Error for ReformatError {}

/// Re-emit the flattened rule sequence one alternative per line.
pub fn reformat(flattened: &str, syntax: &RuleSyntax) -> Result<String, ReformatError> {
    let chunks: Vec<&str> = flattened.split(syntax.terminator).collect();
    let (rules, tail) = chunks.split_at(chunks.len() - 1);

    let mut out = String::new();
    for (index, chunk) in rules.iter().enumerate() {
        emit_rule(chunk, index, syntax, &mut out)?;
    }
    // Whatever follows the final terminator must be blank.
    if !tail[0].trim().is_empty() {
        return Err(ReformatError::MalformedRule {
            index: rules.len(),
            text: tail[0].trim().to_string(),
        });
    }
    Ok(out)
}

fn emit_rule(
    chunk: &str,
    index: usize,
    syntax: &RuleSyntax,
    out: &mut String,
) -> Result<(), ReformatError> {
    let malformed = || ReformatError::MalformedRule {
        index,
        text: chunk.trim().to_string(),
    };
    let (name, body) = chunk.split_once(syntax.defines).ok_or_else(|| malformed())?;
    let name = name.trim();
    if name.is_empty() || name.split_whitespace().count() != 1 {
        return Err(malformed());
    }
    // The text is masked, so any remaining defines token is structural
    // and means the rule did not split into exactly name and body.
    if body.contains(syntax.defines) {
        return Err(malformed());
    }

    out.push('\n');
    out.push_str(name);
    out.push('\n');
    for (i, alternative) in body.split(syntax.alternative).enumerate() {
        let marker = if i == 0 {
            syntax.defines
        } else {
            syntax.alternative
        };
        out.push_str(&syntax.indent);
        out.push(marker);
        let words: Vec<&str> = alternative.split_whitespace().collect();
        if !words.is_empty() {
            out.push(' ');
            out.push_str(&words.join(" "));
        }
        out.push('\n');
    }
    out.push_str(&syntax.indent);
    out.push(syntax.terminator);
    out.push('\n');
    Ok(())
}
