//! # Dialect Module
//!
//! Comment syntax definitions shared by the classifier, analyzer and
//! rewriter.
//!
//! A [`CommentFamily`] is what a file extension maps to. It decides which
//! leading comment syntaxes are recognized ([`Opener`]) and which
//! [`CommentDialect`] is used when a file has no comment at all. The dialect
//! in turn decides how the standard block is written ([`CommentStyle`]).

use serde::Serialize;

/// Extension groups, in the order they are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentFamily {
  /// C, C++ and shader sources
  C,
  /// Java sources
  Java,
  /// JavaScript sources
  JavaScript,
  /// Scripting, build and config files using `#` comments
  Hash,
  /// PlantUML diagrams
  Uml,
}

impl CommentFamily {
  /// All families in matching priority order.
  pub const ALL: [Self; 5] = [Self::C, Self::Java, Self::JavaScript, Self::Hash, Self::Uml];

  /// Name used for this family in configuration files and diagnostics.
  pub const fn name(self) -> &'static str {
    match self {
      Self::C => "c",
      Self::Java => "java",
      Self::JavaScript => "javascript",
      Self::Hash => "hash",
      Self::Uml => "uml",
    }
  }

  /// Leading comment syntaxes recognized for this family, checked in order
  /// against the first substantive line of a file.
  pub const fn openers(self) -> &'static [Opener] {
    match self {
      Self::C | Self::Java | Self::JavaScript => &C_OPENERS,
      Self::Hash => &HASH_OPENERS,
      Self::Uml => &UML_OPENERS,
    }
  }

  /// Dialect used to write a new block into a file that has no leading
  /// comment. `extension` is lowercase and without the leading dot.
  pub fn fallback_dialect(self, extension: &str) -> CommentDialect {
    match self {
      Self::C if extension == "c" => CommentDialect::BlockC,
      Self::C | Self::Java | Self::JavaScript => CommentDialect::LineC,
      Self::Hash => CommentDialect::Hash,
      Self::Uml => CommentDialect::UmlTag,
    }
  }
}

/// How an existing leading comment is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
  /// Runs until a line whose trimmed content ends with `close`.
  Block { close: &'static str },
  /// Runs while each trimmed line starts with `prefix`.
  Lines { prefix: &'static str },
}

/// One recognized way for a leading comment to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
  /// Token the trimmed first substantive line must start with
  pub token: &'static str,
  /// How far the comment extends
  pub scan: Scan,
  /// Dialect used when the comment is replaced
  pub dialect: CommentDialect,
}

const C_OPENERS: [Opener; 2] = [
  Opener {
    token: "/*",
    scan: Scan::Block { close: "*/" },
    dialect: CommentDialect::BlockC,
  },
  Opener {
    token: "//",
    scan: Scan::Lines { prefix: "//" },
    dialect: CommentDialect::LineC,
  },
];

const HASH_OPENERS: [Opener; 1] = [Opener {
  token: "#",
  scan: Scan::Lines { prefix: "#" },
  dialect: CommentDialect::Hash,
}];

const UML_OPENERS: [Opener; 2] = [
  Opener {
    token: "'",
    scan: Scan::Lines { prefix: "'" },
    dialect: CommentDialect::UmlTag,
  },
  Opener {
    token: "/'",
    scan: Scan::Block { close: "'/" },
    dialect: CommentDialect::UmlBlock,
  },
];

/// Comment syntax used to write the standard block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentDialect {
  /// `/*` ... ` */` with ` *` continuation lines
  BlockC,
  /// `//` on every line
  LineC,
  /// `#` on every line
  Hash,
  /// `'` on every line (PlantUML)
  UmlTag,
  /// `/'` ... ` '/` with ` '` continuation lines (PlantUML)
  UmlBlock,
}

impl CommentDialect {
  /// Markers used when writing a block in this dialect.
  pub const fn style(self) -> CommentStyle {
    match self {
      Self::BlockC => CommentStyle::block("/*", " *", " */"),
      Self::LineC => CommentStyle::line("//"),
      Self::Hash => CommentStyle::line("#"),
      Self::UmlTag => CommentStyle::line("'"),
      Self::UmlBlock => CommentStyle::block("/'", " '", " '/"),
    }
  }
}

/// Markers for the top, each middle line, and the bottom of a written block.
///
/// Line dialects repeat their token alone on the top and bottom lines, so a
/// written block is always framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
  /// The line opening the block (e.g., "/*")
  pub top: &'static str,

  /// The prefix of each text line (e.g., " *"); a space separates it from
  /// non-blank text
  pub middle: &'static str,

  /// The line closing the block (e.g., " */")
  pub bottom: &'static str,
}

impl CommentStyle {
  /// Create a line-comment style framed by bare tokens.
  pub const fn line(token: &'static str) -> Self {
    Self {
      top: token,
      middle: token,
      bottom: token,
    }
  }

  /// Create a block-comment style.
  pub const fn block(top: &'static str, middle: &'static str, bottom: &'static str) -> Self {
    Self { top, middle, bottom }
  }
}
