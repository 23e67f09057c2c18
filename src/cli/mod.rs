//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert or replace the copyright block in every applicable file
  copyrighter src/

  # Report what would change without touching any file
  copyrighter --dry-run --show-diff src/

  # Fail (exit code 1) when any file still needs the block
  copyrighter --check .

  # Use a specific configuration file and write a JSON report
  copyrighter --config ci/copyrighter.toml --report-json report.json .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::CommandFactory;

  use super::*;
  use crate::logging::ColorMode;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["copyrighter", "src"]).expect("parse");
    let args = cli.run_args;

    assert_eq!(args.path, PathBuf::from("src"));
    assert!(!args.dry_run);
    assert!(!args.check);
    assert_eq!(args.verbose, 0);
    assert_eq!(args.colors, ColorMode::Auto);
  }

  #[test]
  fn test_parse_flags() {
    let cli = Cli::try_parse_from([
      "copyrighter",
      "--check",
      "--show-diff",
      "-vv",
      "--colors",
      "never",
      "--report-json",
      "out.json",
      ".",
    ])
    .expect("parse");
    let args = cli.run_args;

    assert!(args.check);
    assert!(args.show_diff);
    assert_eq!(args.verbose, 2);
    assert_eq!(args.colors, ColorMode::Never);
    assert_eq!(args.report_json, Some(PathBuf::from("out.json")));
  }

  #[test]
  fn test_path_is_required() {
    assert!(Cli::try_parse_from(["copyrighter"]).is_err());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["copyrighter", "-q", "-v", "."]).is_err());
  }

  #[test]
  fn test_no_config_conflicts_with_config() {
    assert!(Cli::try_parse_from(["copyrighter", "--no-config", "--config", "c.toml", "."]).is_err());
  }
}
