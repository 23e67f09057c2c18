//! # Header Analyzer Module
//!
//! Decides, per file, whether the standard copyright block has to be written
//! and where.
//!
//! Detection is a line-prefix heuristic: after an optional preserved first
//! line (shebang, `@startuml`) and any blank lines, the first substantive
//! line either opens a comment in one of the family's syntaxes or it does
//! not. A comment is scanned to its end. If any of its lines carries another
//! owner's notice the file is left alone, otherwise the comment is replaced.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::trace;

use crate::classifier::FileClass;
use crate::config::Rules;
use crate::dialect::{CommentDialect, Scan};
use crate::processor::FileIO;
use crate::report::Outcome;

/// Byte order mark that may precede the first line.
pub const BOM: char = '\u{feff}';

/// Where the standard block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
  /// Replace the existing comment spanning lines `begin..=end`.
  Replace { begin: usize, end: usize },
  /// Insert before line `at`; nothing is removed.
  Insert { at: usize },
}

/// A file that needs the standard block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
  pub path: PathBuf,
  /// Dialect the block is written in
  pub dialect: CommentDialect,
  /// Original lines, each with its terminator
  pub lines: Vec<String>,
  pub edit: Edit,
}

/// Outcome of analyzing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
  Update(AnalysisResult),
  Skip(Outcome),
}

/// Read `path` and analyze it.
///
/// Read and encoding failures become [`Analysis::Skip`] with the matching
/// outcome.
pub fn analyze(path: &Path, class: &FileClass, rules: &Rules) -> Analysis {
  match FileIO::read_lines(path) {
    Ok(lines) => analyze_lines(path, lines, class, rules),
    Err(e) => {
      trace!("{}", e);
      Analysis::Skip(e.outcome())
    }
  }
}

/// Analyze already-read lines.
pub fn analyze_lines(path: &Path, lines: Vec<String>, class: &FileClass, rules: &Rules) -> Analysis {
  let Some(first) = lines.first() else {
    return Analysis::Skip(Outcome::Empty);
  };

  let prefix = usize::from(rules.skip_first_line.is_match(first.trim_start_matches(BOM)));

  let Some(begin) = (prefix..lines.len()).find(|&idx| !text(&lines[idx]).is_empty()) else {
    return Analysis::Skip(Outcome::CommentOnly);
  };

  let leading = text(&lines[begin]);
  let Some(opener) = class.family.openers().iter().find(|o| leading.starts_with(o.token)) else {
    if !class.auto_insert {
      return Analysis::Skip(Outcome::NoCommentNotAdded);
    }
    return Analysis::Update(AnalysisResult {
      path: path.to_path_buf(),
      dialect: class.fallback,
      lines,
      edit: Edit::Insert { at: prefix },
    });
  };

  let (end, other_owner) = scan_comment(&lines, begin, opener.scan, &rules.other_owner);
  trace!(
    "{}: leading comment on lines {}..={} ({:?})",
    path.display(),
    begin,
    end,
    opener.dialect
  );

  if other_owner {
    return Analysis::Skip(Outcome::OtherCopyrightOwner);
  }

  Analysis::Update(AnalysisResult {
    path: path.to_path_buf(),
    dialect: opener.dialect,
    lines,
    edit: Edit::Replace { begin, end },
  })
}

/// Trimmed line content, ignoring a byte order mark.
fn text(line: &str) -> &str {
  line.trim_start_matches(BOM).trim()
}

/// Returns the index of the comment's last line and whether any of its lines
/// matches `other_owner`. A block comment missing its close runs to the end
/// of the file.
fn scan_comment(lines: &[String], begin: usize, scan: Scan, other_owner: &Regex) -> (usize, bool) {
  let mut found = false;

  match scan {
    Scan::Block { close } => {
      for (idx, line) in lines.iter().enumerate().skip(begin) {
        found |= other_owner.is_match(line);
        if text(line).ends_with(close) {
          return (idx, found);
        }
      }
      (lines.len() - 1, found)
    }
    Scan::Lines { prefix } => {
      let mut end = begin;
      for (idx, line) in lines.iter().enumerate().skip(begin) {
        if !text(line).starts_with(prefix) {
          break;
        }
        found |= other_owner.is_match(line);
        end = idx;
      }
      (end, found)
    }
  }
}
