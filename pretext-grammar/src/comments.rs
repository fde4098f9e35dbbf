//! Tagged-comment line filters.
//!
//! Two documentation toolchains leave region markers in source excerpts:
//! asciidoc include tags (`// tag::name[]` / `// end::name[]`) and madoko
//! region comments (`// BEGIN: name` / `// END: name`). Both filters drop
//! exactly those lines and pass everything else through byte for byte,
//! trailing-newline fidelity included.

use once_cell::sync::Lazy;
use regex::Regex;

static ASCIIDOC_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^// (tag|end)::").unwrap());
static MADOKO_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^// (BEGIN|END):").unwrap());

fn drop_matching(input: &str, pattern: &Regex) -> String {
    input
        .split_inclusive('\n')
        .filter(|line| !pattern.is_match(line))
        .collect()
}

/// Drop asciidoc include-tag comment lines.
pub fn strip_asciidoc_tags(input: &str) -> String {
    drop_matching(input, &ASCIIDOC_TAG)
}

/// Drop madoko region comment lines.
pub fn strip_madoko_comments(input: &str) -> String {
    drop_matching(input, &MADOKO_TAG)
}
