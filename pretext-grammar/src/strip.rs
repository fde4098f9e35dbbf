//! Balanced-brace stripping.
//!
//! Repeatedly deletes innermost `{...}` pairs (interior free of braces)
//! until nothing changes. Each pass peels one nesting level, so depth-d
//! input reaches the fixed point in exactly d passes; a lone unmatched
//! brace is left alone. Runs on masked text (see [`crate::mask`]) so
//! braces inside string literals are invisible here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static INNERMOST_BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

/// One innermost-pair removal pass. Returns `None` at the fixed point.
pub fn strip_pass(text: &str) -> Option<String> {
    match INNERMOST_BRACES.replace_all(text, "") {
        Cow::Borrowed(_) => None,
        Cow::Owned(next) => Some(next),
    }
}

/// Remove balanced brace pairs and their contents until none remain.
pub fn strip_braces(text: &str) -> String {
    let mut content = text.to_string();
    while let Some(next) = strip_pass(&content) {
        content = next;
    }
    content
}

/// Literal substitutions applied after brace stripping: the Bison
/// `%empty` marker becomes an empty-production comment, and the
/// `l_angle` / `r_angle` sentinel tokens become quoted angle brackets.
/// The quoted replacements are inserted in masked form (hex interiors)
/// because this pass runs before the final restore.
pub fn normalize_literals(text: &str) -> String {
    text.replace("%empty", "/* empty */")
        .replace("l_angle", "\"3c\"")
        .replace("r_angle", "\"3e\"")
}
