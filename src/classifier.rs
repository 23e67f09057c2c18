//! # Classifier Module
//!
//! Maps a file name to the comment family its extension belongs to.

use crate::config::Rules;
use crate::dialect::{CommentDialect, CommentFamily};
use crate::report::Outcome;

/// What the analyzer needs to know about an applicable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileClass {
  pub family: CommentFamily,
  /// Whether a file with no leading comment receives the standard block
  pub auto_insert: bool,
  /// Dialect used when no leading comment exists
  pub fallback: CommentDialect,
}

/// Result of classifying a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
  Applicable(FileClass),
  /// Either [`Outcome::Skipped`] or [`Outcome::UnknownExtension`]
  NotApplicable(Outcome),
}

/// Returns the extension of a file name: everything from the last `.` on,
/// or the empty string when there is none.
pub fn extension_of(file_name: &str) -> &str {
  file_name.rfind('.').map_or("", |idx| &file_name[idx..])
}

/// Classify a file by the extension of its name.
///
/// The skip set is checked first, then the family tables in order. Matching
/// is case-insensitive.
pub fn classify(file_name: &str, rules: &Rules) -> Classification {
  let extension = extension_of(file_name).to_lowercase();
  let Some(bare) = extension.strip_prefix('.') else {
    return Classification::NotApplicable(Outcome::UnknownExtension);
  };

  if rules.skip_extensions.iter().any(|ext| ext == bare) {
    return Classification::NotApplicable(Outcome::Skipped);
  }

  rules
    .families
    .iter()
    .find(|rule| rule.extensions.iter().any(|ext| ext == bare))
    .map_or(Classification::NotApplicable(Outcome::UnknownExtension), |rule| {
      Classification::Applicable(FileClass {
        family: rule.family,
        auto_insert: rule.auto_insert,
        fallback: rule.family.fallback_dialect(bare),
      })
    })
}
