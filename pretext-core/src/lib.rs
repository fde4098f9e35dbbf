//! Core line processing for the pretext toolchain.
//!
//! This crate implements the tag-driven preprocessor used to turn annotated
//! spec document sources into LaTeX. The input is processed line by line:
//! lines whose trimmed content exactly matches an entry in the marker table
//! reconfigure the processor (emit listing environments, deposit accumulated
//! grammar text, install a new per-line handler), every other line is handed
//! to whichever handler is currently installed.
//!
//! A separate preliminary pass ([`scraper::scrape`]) walks the same input
//! once to harvest the grammar vocabulary (nonterminals and keywords) that
//! some markers emit as LaTeX listing configuration.

pub mod latex;
pub mod markers;
pub mod processor;
pub mod scraper;

pub use markers::{Callback, MarkerAction};
pub use processor::{process, Context, Handler, Processor, ProcessorOptions};
pub use scraper::{scrape, ScraperRules, Vocabulary};
