//! Integration tests for the pretext binaries.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

#[test]
fn pretext_expands_bnf_block() {
    let source = source_file("%%bnf\nfoo ::= bar\n%%endbnf\n");
    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.arg(source.path());

    cmd.assert().success().stdout(
        predicate::str::contains("%%bnf\n\\begin{lstlisting}[style=BNFstyle]\nfoo ::= bar\n")
            .and(predicate::str::contains("\\end{lstlisting}\n%%endbnf\n")),
    );
}

#[test]
fn pretext_drops_sentinel_comments() {
    let source = source_file("kept\n%%ptcomment internal note\nalso kept\n");
    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.arg(source.path());

    cmd.assert()
        .success()
        .stdout(predicate::eq("kept\nalso kept\n"));
}

#[test]
fn pretext_concatenates_sources_in_order() {
    let first = source_file("first\n");
    let second = source_file("second\n");
    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.arg(first.path()).arg(second.path());

    cmd.assert()
        .success()
        .stdout(predicate::eq("first\nsecond\n"));
}

#[test]
fn pretext_writes_output_file_and_vocab_json() {
    let source = source_file("%%bnf\nexpr ::= expr PLUS term\nterm ::= NUMBER\n%%endbnf\n");
    let dir = tempfile::tempdir().expect("temp dir");
    let out_path = dir.path().join("out.tex");
    let vocab_path = dir.path().join("vocab.json");

    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.arg(source.path())
        .arg("-o")
        .arg(&out_path)
        .arg("--vocab-json")
        .arg(&vocab_path);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let output = fs::read_to_string(&out_path).expect("output file");
    assert!(output.contains("expr ::= expr PLUS term\n"));

    let vocab = fs::read_to_string(&vocab_path).expect("vocab file");
    assert!(vocab.contains("\"nonterminals\""));
    assert!(vocab.contains("\"PLUS\""));
}

#[test]
fn pretext_rejects_missing_source() {
    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.arg("does-not-exist.pt");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.pt"));
}

#[test]
fn pretext_requires_arguments() {
    let mut cmd = cargo_bin_cmd!("pretext");
    cmd.assert().failure();
}

#[test]
fn trim_grammar_reformats_rules() {
    let source = source_file(
        "%token NUMBER\nprogram : one ;\none : \"a\" \"b\" { act(); } | \"c\" ;\n",
    );
    let mut cmd = cargo_bin_cmd!("trim-grammar");
    cmd.arg(source.path());

    cmd.assert().success().stdout(predicate::str::contains(
        "\none\n    : \"a\" \"b\"\n    | \"c\"\n    ;\n",
    ));
}

#[test]
fn trim_grammar_remove_comments_flag() {
    let source = source_file("program : x /* action */ ;\n");
    let mut cmd = cargo_bin_cmd!("trim-grammar");
    cmd.arg(source.path()).arg("--remove-comments");

    cmd.assert()
        .success()
        .stdout(predicate::eq("\nprogram\n    : x\n    ;\n"));
}

#[test]
fn trim_grammar_reads_config_file() {
    let config = source_file("[trim]\nindent = \"  \"\n");
    let source = source_file("program : x | y ;\n");
    let mut cmd = cargo_bin_cmd!("trim-grammar");
    cmd.arg(source.path()).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::eq("\nprogram\n  : x\n  | y\n  ;\n"));
}

#[test]
fn trim_grammar_reports_malformed_rules() {
    let source = source_file("program : x ; stray ;\n");
    let mut cmd = cargo_bin_cmd!("trim-grammar");
    cmd.arg(source.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed rule"));
}

#[test]
fn strip_tag_comments_filters_stdin() {
    let mut cmd = cargo_bin_cmd!("strip-tag-comments");
    cmd.write_stdin("// tag::sample[]\ncode\n// end::sample[]\n");

    cmd.assert().success().stdout(predicate::eq("code\n"));
}

#[test]
fn strip_madoko_comments_filters_files() {
    let source = source_file("// BEGIN: region\ncode\n// END: region\n");
    let mut cmd = cargo_bin_cmd!("strip-madoko-comments");
    cmd.arg(source.path());

    cmd.assert().success().stdout(predicate::eq("code\n"));
}

#[test]
fn filters_preserve_unrelated_lines_byte_for_byte() {
    let input = "  indented\t\nplain // BEGIN: not at start\nlast without newline";
    let mut cmd = cargo_bin_cmd!("strip-madoko-comments");
    cmd.write_stdin(input);

    cmd.assert().success().stdout(predicate::eq(input));
}
