//! # Output Module
//!
//! This module centralizes all user-facing output of copyrighter.
//!
//! Every examined path gets one `<path>: <message>` line on stdout, followed
//! by a summary at the end of the run. Quiet mode keeps only the lines that
//! report errors, so stdout stays usable in scripts.

use std::fmt::Write as _;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{Outcome, ProcessingSummary};

/// Formats the diagnostic line for a path, without colors.
pub fn format_outcome(path: &Path, outcome: &Outcome) -> String {
  format!("{}: {}", path.display(), outcome)
}

/// Print the diagnostic line for a path.
///
/// Errors are always printed; everything else is suppressed in quiet mode.
pub fn print_outcome(path: &Path, outcome: &Outcome) {
  if is_quiet() && !outcome.is_error() {
    return;
  }

  let line = format_outcome(path, outcome);
  if outcome.is_error() {
    println!("{}", line.if_supports_color(Stream::Stdout, |l| l.red()));
  } else if outcome.is_update() {
    println!("{}", line.if_supports_color(Stream::Stdout, |l| l.green()));
  } else {
    println!("{line}");
  }
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Formats the one-line summary, without colors.
///
/// Format: "Summary: X updated, Y unchanged, Z errors". In a dry run the
/// first count reads "would be updated".
pub fn format_summary(summary: &ProcessingSummary, dry_run: bool) -> String {
  let updated_word = if dry_run { "would be updated" } else { "updated" };
  let errors_word = if summary.errors == 1 { "error" } else { "errors" };

  format!(
    "Summary: {} {}, {} unchanged, {} {}",
    summary.updated, updated_word, summary.unchanged, summary.errors, errors_word
  )
}

/// Print the processing summary.
///
/// In verbose mode, also shows timing and the count per outcome.
pub fn print_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let line = format_summary(summary, dry_run);
  let mut line = if summary.errors > 0 {
    line.if_supports_color(Stream::Stdout, |l| l.red()).to_string()
  } else {
    line.if_supports_color(Stream::Stdout, |l| l.cyan()).to_string()
  };

  if is_verbose() {
    let _ = write!(line, " ({:.2}s)", summary.elapsed_ms as f64 / 1000.0);
  }

  println!("{line}");

  if is_verbose() {
    for (kind, count) in &summary.by_kind {
      println!("  {kind}: {count}");
    }
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}
