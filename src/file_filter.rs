//! # File Filter Module
//!
//! This module contains components for filtering directory entries by name
//! before the walker descends into them or processes them.

use regex::Regex;

use crate::config::Rules;
use crate::report::Outcome;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Why the entry should not be processed; `None` lets it through
  pub reason: Option<Outcome>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the entry should be processed.
  pub const fn process() -> Self {
    Self { reason: None }
  }

  /// Creates a new FilterResult indicating the entry should be skipped.
  pub const fn skip(reason: Outcome) -> Self {
    Self { reason: Some(reason) }
  }
}

/// Trait for components that filter directory entries.
pub trait FileFilter {
  /// Determines whether an entry with the given name should be processed.
  fn should_process(&self, name: &str) -> FilterResult;
}

/// Filter applying the include and exclude patterns to entry names.
///
/// The include pattern must match somewhere in the name, and the exclude
/// pattern must not.
#[derive(Debug, Clone)]
pub struct NameFilter {
  include: Regex,
  exclude: Regex,
}

impl NameFilter {
  /// Creates a new NameFilter from explicit patterns.
  pub const fn new(include: Regex, exclude: Regex) -> Self {
    Self { include, exclude }
  }

  /// Creates a new NameFilter from the run's rules.
  pub fn from_rules(rules: &Rules) -> Self {
    Self::new(rules.include.clone(), rules.exclude.clone())
  }
}

impl FileFilter for NameFilter {
  fn should_process(&self, name: &str) -> FilterResult {
    if !self.include.is_match(name) {
      FilterResult::skip(Outcome::NotIncluded)
    } else if self.exclude.is_match(name) {
      FilterResult::skip(Outcome::Excluded)
    } else {
      FilterResult::process()
    }
  }
}
