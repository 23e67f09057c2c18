//! # Rewriter Module
//!
//! Produces the new content of a file from an [`AnalysisResult`]. This is a
//! pure transformation; writing the result is the processor's job.

use crate::analyzer::{AnalysisResult, BOM, Edit};
use crate::dialect::CommentStyle;

/// Formats the copyright text with the given comment style.
///
/// The block is framed by `style.top` and `style.bottom`. Each text line is
/// prefixed with `style.middle` and a space; blank text lines get the bare
/// middle marker. Every emitted line ends with `newline`.
pub fn format_with_comment_style(copyright: &[String], style: &CommentStyle, newline: &str) -> Vec<String> {
  let mut block = Vec::with_capacity(copyright.len() + 2);

  block.push(format!("{}{newline}", style.top));

  for line in copyright {
    if line.trim().is_empty() {
      block.push(format!("{}{newline}", style.middle));
    } else {
      block.push(format!("{} {}{newline}", style.middle, line));
    }
  }

  block.push(format!("{}{newline}", style.bottom));

  block
}

/// Line terminator used for inserted lines: that of the file's first line,
/// defaulting to `\n`.
pub fn detect_newline(lines: &[String]) -> &'static str {
  match lines.first() {
    Some(first) if first.ends_with("\r\n") => "\r\n",
    _ => "\n",
  }
}

/// Builds the replacement lines for an analyzed file.
///
/// Lines before the edit are copied verbatim, followed by the formatted
/// block, followed by everything after the replaced comment (or everything
/// from the insertion point). A byte order mark on the first line stays at
/// the start of the file.
pub fn rewrite(result: &AnalysisResult, copyright: &[String]) -> Vec<String> {
  let lines = &result.lines;
  let (head, tail) = match result.edit {
    Edit::Replace { begin, end } => (begin, end + 1),
    Edit::Insert { at } => (at, at),
  };

  let newline = detect_newline(lines);
  let style = result.dialect.style();
  let mut block = format_with_comment_style(copyright, &style, newline);

  let bom = head == 0 && lines.first().is_some_and(|line| line.starts_with(BOM));
  if bom {
    block[0].insert(0, BOM);
  }

  let mut out = Vec::with_capacity(lines.len() + block.len());
  out.extend_from_slice(&lines[..head]);
  out.extend(block);
  for (idx, line) in lines.iter().enumerate().skip(tail) {
    if bom && idx == 0 {
      out.push(line.trim_start_matches(BOM).to_string());
    } else {
      out.push(line.clone());
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::config::DEFAULT_COPYRIGHT;
  use crate::dialect::CommentDialect;

  fn copyright() -> Vec<String> {
    DEFAULT_COPYRIGHT.iter().map(|line| (*line).to_string()).collect()
  }

  fn lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
  }

  fn result(content: &str, dialect: CommentDialect, edit: Edit) -> AnalysisResult {
    AnalysisResult {
      path: PathBuf::from("test"),
      dialect,
      lines: lines(content),
      edit,
    }
  }

  const HASH_BLOCK: &str = "#\n# BEGIN OF TEST\n#\n# Copyright (C) 2023 Commscope. All rights reserved.\n#\n# END OF TEST\n#\n";

  const C_BLOCK: &str = "/*\n * BEGIN OF TEST\n *\n * Copyright (C) 2023 Commscope. All rights reserved.\n *\n * END OF TEST\n */\n";

  #[test]
  fn test_format_block_style() {
    let block = format_with_comment_style(&copyright(), &CommentDialect::BlockC.style(), "\n");
    assert_eq!(block.concat(), C_BLOCK);
  }

  #[test]
  fn test_format_line_styles() {
    let block = format_with_comment_style(&copyright(), &CommentDialect::Hash.style(), "\n");
    assert_eq!(block.concat(), HASH_BLOCK);

    let block = format_with_comment_style(&["Hi".to_string()], &CommentDialect::LineC.style(), "\n");
    assert_eq!(block.concat(), "//\n// Hi\n//\n");

    let block = format_with_comment_style(&["Hi".to_string()], &CommentDialect::UmlTag.style(), "\n");
    assert_eq!(block.concat(), "'\n' Hi\n'\n");

    let block = format_with_comment_style(&["Hi".to_string(), String::new()], &CommentDialect::UmlBlock.style(), "\n");
    assert_eq!(block.concat(), "/'\n ' Hi\n '\n '/\n");
  }

  #[test]
  fn test_insert_after_shebang() {
    let analysis = result("#!/bin/sh\nprint(1)\n", CommentDialect::Hash, Edit::Insert { at: 1 });
    let out = rewrite(&analysis, &copyright()).concat();
    assert_eq!(out, format!("#!/bin/sh\n{HASH_BLOCK}print(1)\n"));
  }

  #[test]
  fn test_insert_at_top_keeps_everything() {
    let original = "\n\nint x;\n";
    let analysis = result(original, CommentDialect::BlockC, Edit::Insert { at: 0 });
    let out = rewrite(&analysis, &copyright()).concat();
    assert_eq!(out, format!("{C_BLOCK}{original}"));
  }

  #[test]
  fn test_replace_drops_old_comment() {
    let analysis = result(
      "\n/* old\n   header */\nint x;\n",
      CommentDialect::BlockC,
      Edit::Replace { begin: 1, end: 2 },
    );
    let out = rewrite(&analysis, &copyright()).concat();
    assert_eq!(out, format!("\n{C_BLOCK}int x;\n"));
  }

  #[test]
  fn test_replace_comment_at_eof() {
    let analysis = result("// only a comment", CommentDialect::LineC, Edit::Replace { begin: 0, end: 0 });
    let out = rewrite(&analysis, &["X".to_string()]).concat();
    assert_eq!(out, "//\n// X\n//\n");
  }

  #[test]
  fn test_byte_order_mark_stays_first() {
    let analysis = result("\u{feff}int x;\n", CommentDialect::LineC, Edit::Insert { at: 0 });
    let out = rewrite(&analysis, &["X".to_string()]).concat();
    assert_eq!(out, "\u{feff}//\n// X\n//\nint x;\n");

    let analysis = result("\u{feff}// old\nint x;\n", CommentDialect::LineC, Edit::Replace { begin: 0, end: 0 });
    let out = rewrite(&analysis, &["X".to_string()]).concat();
    assert_eq!(out, "\u{feff}//\n// X\n//\nint x;\n");
  }

  #[test]
  fn test_crlf_files_get_crlf_block() {
    let analysis = result("# old\r\nx = 1\r\n", CommentDialect::Hash, Edit::Replace { begin: 0, end: 0 });
    let out = rewrite(&analysis, &["A".to_string(), String::new()]).concat();
    assert_eq!(out, "#\r\n# A\r\n#\r\n#\r\nx = 1\r\n");
  }
}
