//! The tag-driven line processor.
//!
//! A small state machine whose state is "which handler currently owns each
//! input line". Marker lines change that state (and may emit text or run a
//! one-shot callback); everything else is dispatched to the installed
//! handler. The state and the BNF accumulator live in an explicit
//! [`Context`] carried by the processor, never in globals.

use crate::latex;
use crate::markers::{self, Callback, MarkerAction};
use crate::scraper::Vocabulary;
use std::io::{self, Write};

/// The per-line transformation currently in charge of non-marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handler {
    /// Copy the line through unchanged.
    #[default]
    Passthrough,
    /// Copy the line and append it to the BNF accumulator.
    AccumulateBnf,
    /// Copy the line inside a code listing.
    ///
    /// Currently identical to passthrough. Kept as a distinct variant
    /// because code listings are where escaping adjustments go if the
    /// listing environment changes.
    Code,
}

/// Options for one processor run.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    /// Lines whose trimmed form starts with this are dropped outright,
    /// before marker lookup.
    pub comment_sentinel: String,
    /// Clear the BNF accumulator after a deposit marker. Historically the
    /// buffer is kept, so a second summary marker re-emits everything
    /// accumulated up to that point.
    pub clear_on_deposit: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            comment_sentinel: "%%ptcomment".to_string(),
            clear_on_deposit: false,
        }
    }
}

/// Mutable state threaded through a processor run.
#[derive(Debug, Default)]
pub struct Context {
    handler: Handler,
    bnf: String,
}

impl Context {
    /// The currently installed handler.
    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// The BNF text accumulated so far, in input order.
    pub fn accumulated_bnf(&self) -> &str {
        &self.bnf
    }
}

/// Line-by-line processor over a scraped [`Vocabulary`].
pub struct Processor<'a> {
    options: ProcessorOptions,
    vocabulary: &'a Vocabulary,
    context: Context,
}

impl<'a> Processor<'a> {
    pub fn new(vocabulary: &'a Vocabulary, options: ProcessorOptions) -> Self {
        Self {
            options,
            vocabulary,
            context: Context::default(),
        }
    }

    /// Process one input line. `line` keeps its trailing newline, if any;
    /// passthrough copies it byte for byte.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let key = line.trim();
        if key.starts_with(&self.options.comment_sentinel) {
            return Ok(());
        }
        if let Some(action) = markers::lookup(key) {
            return self.apply_marker(action, line, out);
        }
        match self.context.handler {
            Handler::Passthrough | Handler::Code => out.write_all(line.as_bytes()),
            Handler::AccumulateBnf => {
                out.write_all(line.as_bytes())?;
                self.context.bnf.push_str(line);
                Ok(())
            }
        }
    }

    /// Inspect the processor state (used by tests and callers that need
    /// the accumulator after a run).
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    fn apply_marker<W: Write>(
        &mut self,
        action: &MarkerAction,
        line: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if action.keep_line {
            out.write_all(line.as_bytes())?;
        }
        if let Some(call) = action.call {
            self.run_callback(call, out)?;
        }
        if let Some(text) = action.add_text {
            out.write_all(text.as_bytes())?;
        }
        self.context.handler = action.handler;
        Ok(())
    }

    fn run_callback<W: Write>(&mut self, call: Callback, out: &mut W) -> io::Result<()> {
        match call {
            Callback::DepositBnf => {
                out.write_all(self.context.bnf.as_bytes())?;
                if self.options.clear_on_deposit {
                    self.context.bnf.clear();
                }
                Ok(())
            }
            Callback::ListKeywords => {
                out.write_all(latex::keyword_dump(&self.vocabulary.keywords).as_bytes())
            }
            Callback::SetBnfListingKeywords => {
                out.write_all(latex::bnf_listing_style(&self.vocabulary.nonterminals).as_bytes())
            }
            Callback::SetP4ListingKeywords => {
                out.write_all(latex::p4_listing_style(&self.vocabulary.keywords).as_bytes())
            }
        }
    }
}

/// Run the whole input through a processor, line by line, returning the
/// final state.
pub fn process<W: Write>(
    input: &str,
    vocabulary: &Vocabulary,
    options: ProcessorOptions,
    out: &mut W,
) -> io::Result<Context> {
    let mut processor = Processor::new(vocabulary, options);
    for line in input.split_inclusive('\n') {
        processor.process_line(line, out)?;
    }
    Ok(processor.into_context())
}
