//! Grammar-file trimming for the pretext toolchain.
//!
//! Strips embedded host-language action blocks and other noise from a
//! Bison-style grammar file so the result can be diffed against the
//! grammar appendix of the spec document. The pipeline masks quoted
//! strings first so that brace stripping and rule reformatting can treat
//! every remaining delimiter as structural, and unmasks them at the end.
//!
//! Also home to the two trivial comment-line filters used by the
//! documentation toolchain (see [`comments`]).

pub mod comments;
pub mod mask;
pub mod pipeline;
pub mod reformat;
pub mod strip;

pub use pipeline::{trim_grammar, PipelineError, TrimOptions};
pub use reformat::RuleSyntax;
