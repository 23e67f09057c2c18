//! # Processor Module
//!
//! This module contains the tree walker: it visits every entry under a root
//! path, filters entries by name, and runs each regular file through the
//! classify, analyze and rewrite pipeline.
//!
//! The module is organized into:
//! - [`file_io`] - File reading and atomic replacement
//!
//! Traversal is sequential and depth-first. Entries of a directory are read
//! completely and sorted by name before any of them is visited, so the
//! `.tmp` siblings created while rewriting are never picked up.

mod file_io;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_io::{FileIO, FileIoError, TEMP_SUFFIX};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::analyzer::{Analysis, analyze};
use crate::classifier::{Classification, classify};
use crate::config::Rules;
use crate::diff::DiffManager;
use crate::file_filter::{FileFilter, NameFilter};
use crate::output::print_outcome;
use crate::report::{FileReport, Outcome};
use crate::rewriter::rewrite;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub rules: Rules,

  /// Analyze and report without writing files
  pub dry_run: bool,

  /// Print each line diagnostic as it is recorded
  pub print_outcomes: bool,

  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with the given rules and defaults for
  /// everything else.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(rules)
  /// }
  /// ```
  pub const fn new(rules: Rules) -> Self {
    Self {
      rules,
      dry_run: false,
      print_outcomes: false,
      diff_manager: None,
    }
  }
}

/// Walks a tree and keeps the copyright block of every applicable file up
/// to date.
pub struct Processor {
  rules: Rules,

  /// Name filter applied to every entry below the root
  filter: NameFilter,

  dry_run: bool,

  print_outcomes: bool,

  diff_manager: DiffManager,

  /// One report per examined path, in visiting order
  file_reports: Vec<FileReport>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      filter: NameFilter::from_rules(&config.rules),
      rules: config.rules,
      dry_run: config.dry_run,
      print_outcomes: config.print_outcomes,
      diff_manager: config.diff_manager.unwrap_or_default(),
      file_reports: Vec::new(),
    }
  }

  /// Walks `root`, recording one outcome per examined path.
  ///
  /// The root itself is never filtered by name. Per-entry failures are
  /// recorded and the walk continues.
  ///
  /// # Errors
  ///
  /// Returns an error if `root` does not exist or cannot be inspected.
  pub fn walk(&mut self, root: &Path) -> Result<()> {
    fs::symlink_metadata(root).with_context(|| format!("Cannot access {}", root.display()))?;

    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
          let reason = e.io_error().map_or_else(|| e.to_string(), ToString::to_string);
          debug!("Failed to read {}: {}", path.display(), reason);
          self.record(path, Outcome::ReadFailed(reason));
          continue;
        }
      };

      let file_type = entry.file_type();

      if entry.depth() > 0 {
        let name = entry.file_name().to_string_lossy();
        let result = self.filter.should_process(&name);
        if let Some(reason) = result.reason {
          trace!("Skipping: {} ({})", entry.path().display(), reason);
          if file_type.is_dir() {
            walker.skip_current_dir();
          }
          self.record(entry.into_path(), reason);
          continue;
        }
      }

      if file_type.is_dir() {
        trace!("Entering {}", entry.path().display());
      } else if file_type.is_file() {
        let outcome = self.process_file(entry.path());
        self.record(entry.into_path(), outcome);
      } else {
        self.record(entry.into_path(), Outcome::NotRegularFile);
      }
    }

    Ok(())
  }

  /// Runs a single regular file through the pipeline and returns what
  /// happened to it. Nothing is recorded.
  pub fn process_file(&self, path: &Path) -> Outcome {
    let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();

    let class = match classify(&name, &self.rules) {
      Classification::Applicable(class) => class,
      Classification::NotApplicable(outcome) => return outcome,
    };

    let result = match analyze(path, &class, &self.rules) {
      Analysis::Update(result) => result,
      Analysis::Skip(outcome) => return outcome,
    };

    let original = result.lines.concat();
    let updated = rewrite(&result, &self.rules.copyright).concat();

    if updated == original {
      return Outcome::UpToDate;
    }

    if self.dry_run {
      self.diff_manager.display_diff(path, &original, &updated);
      return Outcome::WouldUpdate;
    }

    match FileIO::replace_atomically(path, &updated) {
      Ok(()) => Outcome::Updated,
      Err(e) => {
        debug!("{}", e);
        e.outcome()
      }
    }
  }

  fn record(&mut self, path: PathBuf, outcome: Outcome) {
    if self.print_outcomes {
      print_outcome(&path, &outcome);
    }
    self.file_reports.push(FileReport { path, outcome });
  }

  /// Reports recorded so far, in visiting order.
  pub fn reports(&self) -> &[FileReport] {
    &self.file_reports
  }

  /// Takes the recorded reports, leaving the processor empty.
  pub fn take_reports(&mut self) -> Vec<FileReport> {
    std::mem::take(&mut self.file_reports)
  }

  /// Whether any recorded outcome is a pending or performed update.
  pub fn has_updates(&self) -> bool {
    self.file_reports.iter().any(|report| report.outcome.is_update())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;
  use crate::config::{AutoInsertConfig, Config};

  fn hash_auto_rules() -> Rules {
    Rules::from_config(Config {
      auto_insert: AutoInsertConfig {
        hash: Some(true),
        ..AutoInsertConfig::default()
      },
      ..Config::default()
    })
    .expect("rules")
  }

  fn outcome_of<'a>(processor: &'a Processor, path: &Path) -> Option<&'a Outcome> {
    processor
      .reports()
      .iter()
      .find(|report| report.path == path)
      .map(|report| &report.outcome)
  }

  #[test]
  fn test_walk_records_every_entry_in_order() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    fs::create_dir(root.join("src")).expect("mkdir");
    fs::write(root.join("src/b.py"), "print(1)\n").expect("write");
    fs::write(root.join("src/a.py"), "print(2)\n").expect("write");
    fs::write(root.join("readme.md"), "# Title\n").expect("write");

    let mut processor = Processor::new(ProcessorConfig::new(hash_auto_rules()));
    processor.walk(root).expect("walk");

    let paths: Vec<_> = processor.reports().iter().map(|r| r.path.clone()).collect();
    assert_eq!(
      paths,
      vec![root.join("readme.md"), root.join("src/a.py"), root.join("src/b.py")]
    );
    assert_eq!(outcome_of(&processor, &root.join("readme.md")), Some(&Outcome::Skipped));
    assert!(processor.has_updates());
  }

  #[test]
  fn test_excluded_directory_is_not_entered() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join(".git/objects")).expect("mkdir");
    fs::write(root.join(".git/config.py"), "x = 1\n").expect("write");
    fs::create_dir(root.join("third_party")).expect("mkdir");
    fs::write(root.join("third_party/lib.py"), "x = 1\n").expect("write");

    let mut processor = Processor::new(ProcessorConfig::new(hash_auto_rules()));
    processor.walk(root).expect("walk");

    assert_eq!(processor.reports().len(), 2);
    assert_eq!(outcome_of(&processor, &root.join(".git")), Some(&Outcome::Excluded));
    assert_eq!(outcome_of(&processor, &root.join("third_party")), Some(&Outcome::Excluded));
    assert_eq!(
      fs::read_to_string(root.join("third_party/lib.py")).expect("read"),
      "x = 1\n"
    );
  }

  #[test]
  fn test_root_is_never_filtered() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path().join(".hidden");
    fs::create_dir(&root).expect("mkdir");
    fs::write(root.join("run.sh"), "echo hi\n").expect("write");

    let mut processor = Processor::new(ProcessorConfig::new(hash_auto_rules()));
    processor.walk(&root).expect("walk");

    assert_eq!(outcome_of(&processor, &root.join("run.sh")), Some(&Outcome::Updated));
  }

  #[test]
  fn test_single_file_root() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("a.py");
    fs::write(&path, "#!/bin/sh\nprint(1)\n").expect("write");

    let mut processor = Processor::new(ProcessorConfig::new(hash_auto_rules()));
    processor.walk(&path).expect("walk");

    assert_eq!(outcome_of(&processor, &path), Some(&Outcome::Updated));
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      "#!/bin/sh\n#\n# BEGIN OF TEST\n#\n# Copyright (C) 2023 Commscope. All rights reserved.\n#\n# END OF TEST\n#\nprint(1)\n"
    );
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let mut processor = Processor::new(ProcessorConfig::new(Rules::default()));

    assert!(processor.walk(&dir.path().join("missing")).is_err());
    assert!(processor.reports().is_empty());
  }

  #[test]
  fn test_dry_run_leaves_files_untouched() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("a.py");
    fs::write(&path, "print(1)\n").expect("write");

    let processor = Processor::new(ProcessorConfig {
      dry_run: true,
      ..ProcessorConfig::new(hash_auto_rules())
    });

    assert_eq!(processor.process_file(&path), Outcome::WouldUpdate);
    assert_eq!(fs::read_to_string(&path).expect("read"), "print(1)\n");
  }

  #[test]
  fn test_second_pass_is_up_to_date() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("main.c");
    fs::write(&path, "/* old */\nint x;\n").expect("write");

    let processor = Processor::new(ProcessorConfig::new(Rules::default()));
    assert_eq!(processor.process_file(&path), Outcome::Updated);
    let first = fs::read_to_string(&path).expect("read");

    assert_eq!(processor.process_file(&path), Outcome::UpToDate);
    assert_eq!(fs::read_to_string(&path).expect("read"), first);
  }

  #[cfg(unix)]
  #[test]
  fn test_symlink_is_not_a_regular_file() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    fs::write(root.join("real.py"), "print(1)\n").expect("write");
    std::os::unix::fs::symlink(root.join("real.py"), root.join("link.py")).expect("symlink");

    let mut processor = Processor::new(ProcessorConfig {
      dry_run: true,
      ..ProcessorConfig::new(hash_auto_rules())
    });
    processor.walk(root).expect("walk");

    assert_eq!(outcome_of(&processor, &root.join("link.py")), Some(&Outcome::NotRegularFile));
    assert_eq!(outcome_of(&processor, &root.join("real.py")), Some(&Outcome::WouldUpdate));
  }

  #[test]
  fn test_take_reports() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("notes.txt"), "hello\n").expect("write");

    let mut processor = Processor::new(ProcessorConfig::new(Rules::default()));
    processor.walk(dir.path()).expect("walk");

    let reports = processor.take_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, Outcome::UnknownExtension);
    assert!(processor.reports().is_empty());
  }
}
