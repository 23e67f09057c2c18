//! # Report Module
//!
//! This module records what happened to every examined path and can write
//! that record as a JSON report.
//!
//! Each path gets exactly one [`Outcome`]. Its `Display` form is the
//! diagnostic printed next to the path on standard output.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Result of examining a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum Outcome {
  /// Extension is in the skip set
  Skipped,
  /// The file or directory could not be read
  ReadFailed(String),
  /// The file is not valid UTF-8
  NotUtf8,
  /// The file has no lines
  Empty,
  /// Nothing but blank lines after the preserved first line
  CommentOnly,
  /// Entry name does not match the include pattern
  NotIncluded,
  /// Entry name matches the exclude pattern
  Excluded,
  /// The leading comment carries a notice that is kept
  OtherCopyrightOwner,
  /// No leading comment and auto-insert is off for the family
  NoCommentNotAdded,
  /// No extension, or one that belongs to no family
  UnknownExtension,
  /// Symlink, device, socket or fifo
  NotRegularFile,
  /// Writing or renaming the replacement failed
  WriteFailed(String),
  /// The standard block was written
  Updated,
  /// The standard block would be written (dry run)
  WouldUpdate,
  /// Rewriting would reproduce the file byte for byte
  UpToDate,
}

impl Outcome {
  /// Stable short name, used as the summary key.
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Skipped => "skipped",
      Self::ReadFailed(_) => "read-failed",
      Self::NotUtf8 => "not-utf8",
      Self::Empty => "empty",
      Self::CommentOnly => "comment-only",
      Self::NotIncluded => "not-included",
      Self::Excluded => "excluded",
      Self::OtherCopyrightOwner => "other-copyright-owner",
      Self::NoCommentNotAdded => "no-comment-not-added",
      Self::UnknownExtension => "unknown-extension",
      Self::NotRegularFile => "not-regular-file",
      Self::WriteFailed(_) => "write-failed",
      Self::Updated => "updated",
      Self::WouldUpdate => "would-update",
      Self::UpToDate => "up-to-date",
    }
  }

  /// Whether the path could not be handled because of an I/O problem.
  pub const fn is_error(&self) -> bool {
    matches!(self, Self::ReadFailed(_) | Self::NotUtf8 | Self::WriteFailed(_))
  }

  /// Whether the file was, or would be, rewritten.
  pub const fn is_update(&self) -> bool {
    matches!(self, Self::Updated | Self::WouldUpdate)
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Skipped => f.write_str("skipped"),
      Self::ReadFailed(reason) => write!(f, "failed to read ({reason})"),
      Self::NotUtf8 => f.write_str("not UTF-8 compatible (binary?)"),
      Self::Empty => f.write_str("empty file"),
      Self::CommentOnly => f.write_str("comment only file"),
      Self::NotIncluded => f.write_str("not included"),
      Self::Excluded => f.write_str("excluded"),
      Self::OtherCopyrightOwner => f.write_str("other copyright owner"),
      Self::NoCommentNotAdded => f.write_str("no comment, not added"),
      Self::UnknownExtension => f.write_str("no or unknown extension"),
      Self::NotRegularFile => f.write_str("not a regular file"),
      Self::WriteFailed(reason) => write!(f, "failed to write ({reason})"),
      Self::Updated => f.write_str("update"),
      Self::WouldUpdate => f.write_str("would update"),
      Self::UpToDate => f.write_str("up to date"),
    }
  }
}

/// Information about one examined path
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path as reached from the root
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What happened to it
  pub outcome: Outcome,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Aggregate counts over a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  /// Number of paths examined
  pub total: usize,
  /// Files rewritten, or that would be rewritten in a dry run
  pub updated: usize,
  /// Paths that failed with an I/O or encoding error
  pub errors: usize,
  /// Paths left alone for any other reason
  pub unchanged: usize,
  /// Count per outcome kind
  pub by_kind: BTreeMap<&'static str, usize>,
  /// Wall time of the run in milliseconds
  pub elapsed_ms: u64,
}

impl ProcessingSummary {
  /// Build a summary from the per-path reports.
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for report in reports {
      if report.outcome.is_update() {
        summary.updated += 1;
      } else if report.outcome.is_error() {
        summary.errors += 1;
      } else {
        summary.unchanged += 1;
      }
      *summary.by_kind.entry(report.outcome.kind()).or_default() += 1;
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  root: String,
  dry_run: bool,
  summary: &'a ProcessingSummary,
  files: Vec<FileReport>,
}

/// Writes a JSON report of a run.
pub struct ReportGenerator {
  output_path: PathBuf,
}

impl ReportGenerator {
  /// Creates a generator writing to `output_path`.
  pub fn new(output_path: impl Into<PathBuf>) -> Self {
    Self {
      output_path: output_path.into(),
    }
  }

  /// Render the report as a JSON string. Paths are made relative to `root`
  /// when possible.
  pub fn render(reports: &[FileReport], summary: &ProcessingSummary, root: &Path, dry_run: bool) -> Result<String> {
    let files = reports
      .iter()
      .map(|report| FileReport {
        path: pathdiff::diff_paths(&report.path, root)
          .filter(|rel| !rel.as_os_str().is_empty())
          .unwrap_or_else(|| report.path.clone()),
        outcome: report.outcome.clone(),
      })
      .collect();

    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      root: root.to_string_lossy().into_owned(),
      dry_run,
      summary,
      files,
    };

    serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize report")
  }

  /// Render the report and write it to the output path.
  pub fn generate(&self, reports: &[FileReport], summary: &ProcessingSummary, root: &Path, dry_run: bool) -> Result<()> {
    let content = Self::render(reports, summary, root, dry_run)?;
    fs::write(&self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
