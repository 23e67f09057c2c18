//! # copyrighter
//!
//! Inserts a standard copyright comment block into source files.

use anyhow::Result;
use copyrighter::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
