//! # Configuration Module
//!
//! This module holds the rules copyrighter runs with: the standard copyright
//! text, the per-family auto-insert flags, the filename and content patterns
//! and the extension tables.
//!
//! Every rule has a compiled-in default. Any of them can be overridden from a
//! `.copyrighter.toml` file or the file named by the `COPYRIGHTER_CONFIG`
//! environment variable. The raw [`Config`] is compiled once into an
//! immutable [`Rules`] value that is passed down to the classifier, analyzer
//! and rewriter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::dialect::CommentFamily;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copyrighter.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHTER_CONFIG";

/// The standard copyright block, one entry per line.
pub const DEFAULT_COPYRIGHT: &[&str] = &[
  "BEGIN OF TEST",
  "",
  "Copyright (C) 2023 Commscope. All rights reserved.",
  "",
  "END OF TEST",
];

/// Directory entry names that are walked. Matches everything.
pub const DEFAULT_INCLUDE: &str = ".+";

/// Directory entry names that are never walked: dotfiles, binary and media
/// files, and vendored third party code.
pub const DEFAULT_EXCLUDE: &str =
  r"(^\..+$)|(^.+\.(key|pem|png|jpg|jpeg|mp4|ts|pdf|rawdeflate)$)|third_party|third-party|thirdparty";

/// First lines that are kept in place and never treated as a comment.
pub const DEFAULT_SKIP_FIRST_LINE: &str = r"(^#!)|(^@startuml)";

/// A comment line matching this belongs to a copyright owner whose notice is
/// left untouched.
pub const DEFAULT_OTHER_OWNER: &str = r"(?i)copyright.+active.*video";

/// Extensions that are never touched.
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &["json", "md", "rst"];

const DEFAULT_C_EXTENSIONS: &[&str] = &["cpp", "cxx", "c", "hpp", "hxx", "h", "glsl", "frag", "vert"];
const DEFAULT_JAVA_EXTENSIONS: &[&str] = &["java"];
const DEFAULT_JAVASCRIPT_EXTENSIONS: &[&str] = &["js", "javascript"];
const DEFAULT_HASH_EXTENSIONS: &[&str] = &["py", "sh", "cmake", "nut", "yaml"];
const DEFAULT_UML_EXTENSIONS: &[&str] = &["puml"];

/// Per-family switches controlling whether files without any leading
/// comment receive the standard block.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AutoInsertConfig {
  pub c: Option<bool>,
  pub java: Option<bool>,
  pub javascript: Option<bool>,
  pub hash: Option<bool>,
  pub uml: Option<bool>,
}

impl AutoInsertConfig {
  const fn get(&self, family: CommentFamily) -> Option<bool> {
    match family {
      CommentFamily::C => self.c,
      CommentFamily::Java => self.java,
      CommentFamily::JavaScript => self.javascript,
      CommentFamily::Hash => self.hash,
      CommentFamily::Uml => self.uml,
    }
  }
}

/// Extension tables. Entries are written without the leading dot and are
/// matched case-insensitively.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
  pub skip: Option<Vec<String>>,
  pub c: Option<Vec<String>>,
  pub java: Option<Vec<String>>,
  pub javascript: Option<Vec<String>>,
  pub hash: Option<Vec<String>>,
  pub uml: Option<Vec<String>>,
}

impl ExtensionConfig {
  const fn get(&self, family: CommentFamily) -> Option<&Vec<String>> {
    match family {
      CommentFamily::C => self.c.as_ref(),
      CommentFamily::Java => self.java.as_ref(),
      CommentFamily::JavaScript => self.javascript.as_ref(),
      CommentFamily::Hash => self.hash.as_ref(),
      CommentFamily::Uml => self.uml.as_ref(),
    }
  }

  fn entries(&self) -> impl Iterator<Item = (&'static str, &String)> {
    let skip = self.skip.iter().flatten().map(|ext| ("skip", ext));
    let families = CommentFamily::ALL
      .into_iter()
      .flat_map(move |family| self.get(family).into_iter().flatten().map(move |ext| (family.name(), ext)));
    skip.chain(families)
  }
}

/// Raw configuration as read from a `.copyrighter.toml` file.
///
/// Every field is optional; anything left out keeps its compiled-in default.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Lines of the standard copyright block.
  pub copyright: Option<Vec<String>>,

  /// Directory entry names that are walked.
  pub include: Option<String>,

  /// Directory entry names that are not walked.
  pub exclude: Option<String>,

  /// First lines preserved verbatim (shebangs, diagram tags).
  pub skip_first_line: Option<String>,

  /// Comment lines identifying a notice that must be kept.
  pub other_owner: Option<String>,

  #[serde(default)]
  pub auto_insert: AutoInsertConfig,

  #[serde(default)]
  pub extensions: ExtensionConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A pattern does not compile.
  #[error("Invalid pattern for '{key}': {source}")]
  InvalidPattern { key: &'static str, source: regex::Error },

  /// An extension table entry is malformed.
  #[error("Invalid extension '{extension}' in '{table}': {message}")]
  InvalidExtension {
    table: &'static str,
    extension: String,
    message: &'static str,
  },

  /// The copyright text has no lines.
  #[error("The copyright text cannot be empty")]
  EmptyCopyright,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the parts of the configuration that do not need compiling.
  ///
  /// Checks that:
  /// - The copyright text, if given, has at least one line
  /// - Extension entries are non-empty and don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    if self.copyright.as_ref().is_some_and(Vec::is_empty) {
      return Err(ConfigError::EmptyCopyright);
    }

    for (table, ext) in self.extensions.entries() {
      if ext.is_empty() {
        return Err(ConfigError::InvalidExtension {
          table,
          extension: ext.clone(),
          message: "extension cannot be empty",
        });
      }

      if ext.starts_with('.') {
        return Err(ConfigError::InvalidExtension {
          table,
          extension: ext.clone(),
          message: "extension should not include leading dot",
        });
      }
    }

    Ok(())
  }
}

/// Extension table and auto-insert flag for one comment family.
#[derive(Debug, Clone)]
pub struct FamilyRule {
  pub family: CommentFamily,
  /// Lowercase extensions without the leading dot
  pub extensions: Vec<String>,
  pub auto_insert: bool,
}

/// The compiled, immutable rule set for a run.
#[derive(Debug, Clone)]
pub struct Rules {
  /// Lines of the standard copyright block
  pub copyright: Vec<String>,
  pub include: Regex,
  pub exclude: Regex,
  pub skip_first_line: Regex,
  pub other_owner: Regex,
  /// Lowercase extensions that are never touched
  pub skip_extensions: Vec<String>,
  /// Family tables in matching order
  pub families: Vec<FamilyRule>,
}

impl Default for Rules {
  fn default() -> Self {
    // Only the DEFAULT_* constants are compiled here; test_default_rules covers them.
    Self::from_config(Config::default()).expect("built-in rules must compile")
  }
}

impl Rules {
  /// Compile a configuration into rules, filling gaps with the defaults.
  pub fn from_config(config: Config) -> Result<Self, ConfigError> {
    config.validate()?;

    let copyright = config
      .copyright
      .unwrap_or_else(|| DEFAULT_COPYRIGHT.iter().map(|line| (*line).to_string()).collect());

    let skip_extensions = normalize_extensions(config.extensions.skip.as_deref(), DEFAULT_SKIP_EXTENSIONS);

    let families = CommentFamily::ALL
      .into_iter()
      .map(|family| FamilyRule {
        family,
        extensions: normalize_extensions(
          config.extensions.get(family).map(Vec::as_slice),
          default_extensions(family),
        ),
        auto_insert: config.auto_insert.get(family).unwrap_or(false),
      })
      .collect();

    Ok(Self {
      copyright,
      include: compile("include", config.include.as_deref(), DEFAULT_INCLUDE)?,
      exclude: compile("exclude", config.exclude.as_deref(), DEFAULT_EXCLUDE)?,
      skip_first_line: compile("skip-first-line", config.skip_first_line.as_deref(), DEFAULT_SKIP_FIRST_LINE)?,
      other_owner: compile("other-owner", config.other_owner.as_deref(), DEFAULT_OTHER_OWNER)?,
      skip_extensions,
      families,
    })
  }

  /// Whether the standard block would itself be taken for another owner's
  /// notice. Either way a second run leaves files unchanged.
  pub fn copyright_matches_other_owner(&self) -> bool {
    self.copyright.iter().any(|line| self.other_owner.is_match(line))
  }
}

fn compile(key: &'static str, pattern: Option<&str>, default: &str) -> Result<Regex, ConfigError> {
  Regex::new(pattern.unwrap_or(default)).map_err(|source| ConfigError::InvalidPattern { key, source })
}

fn normalize_extensions(configured: Option<&[String]>, default: &[&str]) -> Vec<String> {
  match configured {
    Some(exts) => exts.iter().map(|ext| ext.to_lowercase()).collect(),
    None => default.iter().map(|ext| (*ext).to_string()).collect(),
  }
}

const fn default_extensions(family: CommentFamily) -> &'static [&'static str] {
  match family {
    CommentFamily::C => DEFAULT_C_EXTENSIONS,
    CommentFamily::Java => DEFAULT_JAVA_EXTENSIONS,
    CommentFamily::JavaScript => DEFAULT_JAVASCRIPT_EXTENSIONS,
    CommentFamily::Hash => DEFAULT_HASH_EXTENSIONS,
    CommentFamily::Uml => DEFAULT_UML_EXTENSIONS,
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYRIGHTER_CONFIG` environment variable
/// 3. `.copyrighter.toml` in the root directory being processed
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem.
pub fn discover_config_path(explicit_path: Option<&Path>, root_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root_dir.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load the rules for a run: the discovered config file compiled over the
/// defaults, or the defaults alone when there is no file or `no_config` is
/// set.
pub fn load_rules(explicit_path: Option<&Path>, root_dir: &Path, no_config: bool) -> Result<Rules> {
  let config = if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    Config::default()
  } else {
    match discover_config_path(explicit_path, root_dir) {
      Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?,
      None => Config::default(),
    }
  };

  Rules::from_config(config).with_context(|| "Invalid configuration")
}
