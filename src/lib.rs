//! # copyrighter
//!
//! A tool that walks a source tree and makes sure every applicable file starts
//! with a standard copyright comment block.
//!
//! For each regular file, copyrighter picks a comment family from the file's
//! extension, looks at the first comment block (after an optional shebang or
//! `@startuml` line), and then:
//!
//! * replaces that comment with the standard block, written in the same
//!   comment syntax,
//! * leaves the file alone if the comment carries another owner's notice,
//! * or, when the file has no leading comment, inserts the block if the
//!   family's auto-insert switch is on.
//!
//! Files are rewritten through a temporary sibling and an atomic rename.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use copyrighter::config::Rules;
//! use copyrighter::processor::{Processor, ProcessorConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut processor = Processor::new(ProcessorConfig {
//!         dry_run: true,
//!         ..ProcessorConfig::new(Rules::default())
//!     });
//!
//!     processor.walk(Path::new("src"))?;
//!
//!     for report in processor.reports() {
//!         println!("{}: {}", report.path.display(), report.outcome);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`classifier`] - Maps file names to comment families
//! * [`analyzer`] - Finds the leading comment and decides what to do with it
//! * [`rewriter`] - Builds the new file content
//! * [`processor`] - Walks the tree and writes files
//! * [`config`] - Rules and the `.copyrighter.toml` layer

pub mod analyzer;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dialect;
pub mod diff;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod rewriter;
