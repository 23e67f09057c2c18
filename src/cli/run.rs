//! # Run Command
//!
//! This module implements the single command of copyrighter: walk a tree and
//! insert or replace the standard copyright block.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::{debug, warn};

use crate::config::load_rules;
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_blank_line, print_hint, print_summary};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::{FileReport, ProcessingSummary, ReportGenerator};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
  /// File or directory to process. Directories are processed recursively.
  #[arg(value_name = "PATH")]
  pub path: PathBuf,

  /// Path to config file (default: .copyrighter.toml in the root directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Dry run mode: report what would change without modifying files
  #[arg(long)]
  pub dry_run: bool,

  /// Check mode: like --dry-run, but exit with code 1 if any file would be
  /// updated
  #[arg(long)]
  pub check: bool,

  /// Show diff of pending changes (with --dry-run or --check)
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of all outcomes to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  /// Validate the arguments and return an error if invalid
  fn validate(&self) -> Result<(), String> {
    if std::fs::symlink_metadata(&self.path).is_err() {
      return Err(format!("Path does not exist: {}", self.path.display()));
    }
    Ok(())
  }

  /// Whether files are left untouched.
  const fn is_dry_run(&self) -> bool {
    self.dry_run || self.check
  }

  /// Directory the config file and report paths are resolved against: the
  /// path itself if it is a directory, otherwise its parent.
  fn root_dir(&self) -> PathBuf {
    if self.path.is_dir() {
      return self.path.clone();
    }

    match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    }
  }
}

/// Run copyrighter with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  debug!(
    "copyrighter {} ({})",
    env!("CARGO_PKG_VERSION"),
    option_env!("GIT_HASH").unwrap_or("unknown revision")
  );

  if let Err(e) = args.validate() {
    eprintln!("ERROR: {e}");
    process::exit(1);
  }

  let root_dir = args.root_dir();
  let dry_run = args.is_dry_run();

  let rules = load_rules(args.config.as_deref(), &root_dir, args.no_config)?;
  if rules.copyright_matches_other_owner() {
    warn!("The copyright text matches the other-owner pattern; files carrying it will be left unchanged");
  }

  if args.show_diff && !dry_run {
    warn!("--show-diff only applies with --dry-run or --check");
  }

  let mut processor = Processor::new(ProcessorConfig {
    dry_run,
    print_outcomes: true,
    diff_manager: Some(DiffManager::new(args.show_diff)),
    ..ProcessorConfig::new(rules)
  });

  let start_time = Instant::now();
  processor.walk(&args.path)?;
  let elapsed = start_time.elapsed();

  let file_reports = processor.take_reports();
  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);
  debug!("Examined {} paths in {}ms", summary.total, summary.elapsed_ms);

  print_blank_line();
  print_summary(&summary, dry_run);

  let pending = args.check && summary.updated > 0;
  if pending {
    print_blank_line();
    print_hint("Run without --check to write the copyright block.");
  }

  if let Some(ref output_path) = args.report_json {
    write_report(output_path, &file_reports, &summary, &root_dir, dry_run);
  }

  if pending {
    process::exit(1);
  }

  Ok(())
}

fn write_report(
  output_path: &Path,
  file_reports: &[FileReport],
  summary: &ProcessingSummary,
  root_dir: &Path,
  dry_run: bool,
) {
  let report_generator = ReportGenerator::new(output_path);
  if let Err(e) = report_generator.generate(file_reports, summary, root_dir, dry_run) {
    eprintln!("Error generating JSON report: {e:#}");
  } else {
    info_log!("Generated JSON report at {}", output_path.display());
  }
}
