//! The marker-line vocabulary.
//!
//! A marker must appear alone on its own line (surrounding whitespace is
//! ignored). When the processor recognizes one, it applies the marker's
//! [`MarkerAction`] instead of dispatching the line to the active handler.
//! Keys are exact, non-overlapping literals, so at most one entry can match
//! a given line.

use crate::processor::Handler;

/// One-shot actions a marker can trigger against the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    /// Write the entire accumulated BNF buffer.
    DepositBnf,
    /// Write the scraped keyword list as a `Verbatim` block.
    ListKeywords,
    /// Write the BNF `lstlisting` style, keyed on scraped nonterminals.
    SetBnfListingKeywords,
    /// Write the P4 `lstlisting` style, keyed on scraped keywords.
    SetP4ListingKeywords,
}

/// What to do when a marker line is recognized.
///
/// The fields are applied in declaration order: echo the marker line,
/// run the callback, emit the literal text, install the handler. Every
/// marker resets the active handler; markers that only emit text fall
/// back to [`Handler::Passthrough`].
#[derive(Debug, Clone, Copy)]
pub struct MarkerAction {
    /// Copy the marker line itself to the output before anything else.
    pub keep_line: bool,
    pub call: Option<Callback>,
    /// Literal text appended to the output.
    pub add_text: Option<&'static str>,
    /// Handler installed for subsequent non-marker lines.
    pub handler: Handler,
}

/// Opens a grammar block (also starts BNF accumulation).
pub const BLOCK_OPEN: &str = "%%bnf";
/// Opens a grammar block for the summary section; closed by the regular
/// close marker.
pub const BLOCK_OPEN_SUMMARY: &str = "%%bnfsummarystart";
/// Closes a grammar block.
pub const BLOCK_CLOSE: &str = "%%endbnf";

/// Prefix of per-line keyword suppression markers
/// (`%%not_a_keyword ident`). Handled by the scraper, not by the marker
/// table: the identifier argument makes these lines non-exact.
pub const NOT_A_KEYWORD: &str = "%%not_a_keyword";

const BNF_BEGIN: &str = "%%bnf\n\\begin{lstlisting}[style=BNFstyle]\n";
const BNF_END: &str = "\\end{lstlisting}\n%%endbnf\n";
const CODE_BEGIN: &str = "%%code\n\\begin{lstlisting}[style=P4style]\n";
const CODE_END: &str = "\\end{lstlisting}\n%%endcode\n";

const PASSTHROUGH: MarkerAction = MarkerAction {
    keep_line: false,
    call: None,
    add_text: None,
    handler: Handler::Passthrough,
};

/// The marker table. Keys are trimmed-line literals.
pub static MARKER_TABLE: &[(&str, MarkerAction)] = &[
    (
        BLOCK_OPEN,
        MarkerAction {
            add_text: Some(BNF_BEGIN),
            handler: Handler::AccumulateBnf,
            ..PASSTHROUGH
        },
    ),
    (
        BLOCK_CLOSE,
        MarkerAction {
            add_text: Some(BNF_END),
            ..PASSTHROUGH
        },
    ),
    (
        "%%code",
        MarkerAction {
            add_text: Some(CODE_BEGIN),
            handler: Handler::Code,
            ..PASSTHROUGH
        },
    ),
    (
        "%%endcode",
        MarkerAction {
            add_text: Some(CODE_END),
            ..PASSTHROUGH
        },
    ),
    (
        BLOCK_OPEN_SUMMARY,
        MarkerAction {
            add_text: Some(BNF_BEGIN),
            ..PASSTHROUGH
        },
    ),
    (
        "%%bnfsummary",
        MarkerAction {
            call: Some(Callback::DepositBnf),
            ..PASSTHROUGH
        },
    ),
    (
        "%%listkeywords",
        MarkerAction {
            call: Some(Callback::ListKeywords),
            ..PASSTHROUGH
        },
    ),
    (
        "%%set_bnf_lstlisting_keywords",
        MarkerAction {
            call: Some(Callback::SetBnfListingKeywords),
            ..PASSTHROUGH
        },
    ),
    (
        "%%set_p4_lstlisting_keywords",
        MarkerAction {
            call: Some(Callback::SetP4ListingKeywords),
            ..PASSTHROUGH
        },
    ),
];

/// Look up a trimmed line in the marker table.
pub fn lookup(trimmed: &str) -> Option<&'static MarkerAction> {
    MARKER_TABLE
        .iter()
        .find(|(key, _)| *key == trimmed)
        .map(|(_, action)| action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_exact_matches() {
        assert!(lookup("%%bnf").is_some());
        assert!(lookup("%%bnf ").is_none());
        assert!(lookup("%%bnfx").is_none());
        assert!(lookup("bnf").is_none());
    }

    #[test]
    fn keys_are_unique() {
        for (i, (key, _)) in MARKER_TABLE.iter().enumerate() {
            assert!(
                !MARKER_TABLE[i + 1..].iter().any(|(other, _)| other == key),
                "duplicate marker key {key}"
            );
        }
    }

    #[test]
    fn block_open_installs_accumulator() {
        let action = lookup(BLOCK_OPEN).unwrap();
        assert_eq!(action.handler, Handler::AccumulateBnf);
        assert!(action.add_text.unwrap().contains("BNFstyle"));
    }

    #[test]
    fn summary_start_leaves_passthrough() {
        let action = lookup(BLOCK_OPEN_SUMMARY).unwrap();
        assert_eq!(action.handler, Handler::Passthrough);
        assert_eq!(action.add_text, lookup(BLOCK_OPEN).unwrap().add_text);
    }
}
