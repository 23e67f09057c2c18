//! # Diff Module
//!
//! This module renders the difference between a file's current content and
//! the content it would get, for `--show-diff` in dry-run and check modes.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for pending header changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager {
  /// Whether to show diffs in dry run mode
  pub show_diff: bool,
}

impl DiffManager {
  /// Creates a new DiffManager.
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders a line diff between `original` and `new` as plain text.
  ///
  /// The output starts with a `Diff for <path>:` header and prefixes every
  /// line with `-`, `+` or a space.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut content = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      content.push_str(sign(change.tag()));
      content.push_str(change.value());
      if change.missing_newline() {
        content.push('\n');
      }
    }

    content
  }

  /// Prints the diff to stderr if `show_diff` is enabled, colorized when
  /// stderr supports it.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    let rendered = Self::render_diff(path, original, new);
    let mut lines = rendered.lines();

    if let Some(header) = lines.next() {
      eprintln!("{header}");
    }

    for line in lines {
      if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else {
        eprintln!("{line}");
      }
    }

    eprintln!();
  }
}

const fn sign(tag: ChangeTag) -> &'static str {
  match tag {
    ChangeTag::Delete => "-",
    ChangeTag::Insert => "+",
    ChangeTag::Equal => " ",
  }
}
