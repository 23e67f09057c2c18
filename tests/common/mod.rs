#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use copyrighter::config::{AutoInsertConfig, Config, Rules};

/// The standard block as written into Hash-family files.
pub const HASH_BLOCK: &str = concat!(
  "#\n",
  "# BEGIN OF TEST\n",
  "#\n",
  "# Copyright (C) 2023 Commscope. All rights reserved.\n",
  "#\n",
  "# END OF TEST\n",
  "#\n",
);

/// The standard block as written in C block-comment syntax.
pub const C_BLOCK: &str = concat!(
  "/*\n",
  " * BEGIN OF TEST\n",
  " *\n",
  " * Copyright (C) 2023 Commscope. All rights reserved.\n",
  " *\n",
  " * END OF TEST\n",
  " */\n",
);

/// The standard block as written in C line-comment syntax.
pub const LINE_C_BLOCK: &str = concat!(
  "//\n",
  "// BEGIN OF TEST\n",
  "//\n",
  "// Copyright (C) 2023 Commscope. All rights reserved.\n",
  "//\n",
  "// END OF TEST\n",
  "//\n",
);

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file as UTF-8.
pub fn read(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Default rules with auto-insert switched on for every family.
pub fn auto_insert_rules() -> Result<Rules> {
  let config = Config {
    auto_insert: AutoInsertConfig {
      c: Some(true),
      java: Some(true),
      javascript: Some(true),
      hash: Some(true),
      uml: Some(true),
    },
    ..Config::default()
  };
  Ok(Rules::from_config(config)?)
}

/// Every `.tmp` file left anywhere under `root`.
pub fn leftover_temp_files(root: &Path) -> Vec<PathBuf> {
  walkdir::WalkDir::new(root)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
    .map(walkdir::DirEntry::into_path)
    .collect()
}
