//! End-to-end runs of the scrape + process pipeline over small documents.

use pretext_core::processor::{process, ProcessorOptions};
use pretext_core::scraper::{scrape, ScraperRules};

fn run(input: &str) -> String {
    let vocabulary = scrape(input, &ScraperRules::default());
    let mut out = Vec::new();
    process(input, &vocabulary, ProcessorOptions::default(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn bnf_block_round_trip() {
    let output = run("%%bnf\nfoo ::= bar\n%%endbnf\n");
    assert_eq!(
        output,
        "%%bnf\n\\begin{lstlisting}[style=BNFstyle]\n\
         foo ::= bar\n\
         \\end{lstlisting}\n%%endbnf\n"
    );
}

#[test]
fn summary_redeposits_accumulated_blocks() {
    let input = "\
%%bnf
first ::= a_rule
%%endbnf
prose in between
%%bnfsummarystart
%%bnfsummary
%%endbnf
";
    let output = run(input);
    // The summary section re-opens a listing and replays the buffer.
    let summary_at = output.rfind("first ::= a_rule\n").unwrap();
    let block_at = output.find("first ::= a_rule\n").unwrap();
    assert!(summary_at > block_at);
    assert!(output.contains("prose in between\n"));
}

#[test]
fn listing_styles_use_scraped_vocabulary() {
    let input = "\
%%not_a_keyword ignored
%%bnf
expr ::= expr PLUS term
term ::= NUMBER ignored
%%endbnf
%%set_bnf_lstlisting_keywords
%%set_p4_lstlisting_keywords
%%listkeywords
";
    let output = run(input);
    assert!(output.contains("morekeywords={expr, term}%"));
    assert!(output.contains("keywords={NUMBER, PLUS},%"));
    assert!(output.contains("\\begin{Verbatim}[commandchars=\\\\\\{\\}]\nNUMBER\nPLUS\n"));
    assert!(!output.contains("ignored\nNUMBER"));
}

#[test]
fn document_outside_blocks_is_untouched() {
    let input = "\\section{Intro}\nSome prose.\n\n  indented\n";
    assert_eq!(run(input), input);
}
