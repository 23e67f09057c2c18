//! # File I/O Module
//!
//! This module provides file reading and atomic replacement for the
//! processor. It encapsulates synchronous file operations.

use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use tracing::{debug, warn};

use crate::report::Outcome;

/// Suffix of the sibling file a replacement is written to before the rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Errors raised while reading or replacing a file.
#[derive(Debug, thiserror::Error)]
pub enum FileIoError {
  /// The file could not be opened or read.
  #[error("Failed to read {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The file content is not valid UTF-8.
  #[error("{path} is not valid UTF-8: {source}")]
  Encoding { path: PathBuf, source: FromUtf8Error },

  /// The temporary file could not be created, written or closed.
  #[error("Failed to write {path}: {source}")]
  Write { path: PathBuf, source: std::io::Error },

  /// The temporary file could not be renamed over the original.
  #[error("Failed to rename {from} to {to}: {source}")]
  Rename {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },
}

impl FileIoError {
  /// The diagnostic reported for this error.
  pub fn outcome(&self) -> Outcome {
    match self {
      Self::Read { source, .. } => Outcome::ReadFailed(source.to_string()),
      Self::Encoding { .. } => Outcome::NotUtf8,
      Self::Write { source, .. } | Self::Rename { source, .. } => Outcome::WriteFailed(source.to_string()),
    }
  }
}

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads a file as lines, each keeping its original terminator.
  ///
  /// The last line has no terminator if the file does not end with one.
  pub fn read_lines(path: &Path) -> Result<Vec<String>, FileIoError> {
    let bytes = fs::read(path).map_err(|source| FileIoError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let content = String::from_utf8(bytes).map_err(|source| FileIoError::Encoding {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(content.split_inclusive('\n').map(str::to_string).collect())
  }

  /// Path of the temporary sibling used when replacing `path`.
  pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
  }

  /// Replaces the content of `path` atomically.
  ///
  /// The content is written to a `<name>.tmp` sibling which is synced and
  /// closed before it is renamed over the original. The original's
  /// permissions are carried over. On any failure the temporary file is
  /// removed and the original is left untouched. An existing `<name>.tmp`
  /// is never overwritten or removed; the replacement fails instead.
  pub fn replace_atomically(path: &Path, content: &str) -> Result<(), FileIoError> {
    let temp = Self::temp_path(path);

    let file = match OpenOptions::new().write(true).create_new(true).open(&temp) {
      Ok(file) => file,
      Err(source) => return Err(FileIoError::Write { path: temp, source }),
    };

    if let Err(source) = Self::write_temp(file, path, &temp, content) {
      Self::discard(&temp);
      return Err(FileIoError::Write { path: temp, source });
    }

    if let Err(source) = fs::rename(&temp, path) {
      Self::discard(&temp);
      return Err(FileIoError::Rename {
        from: temp,
        to: path.to_path_buf(),
        source,
      });
    }

    debug!("Replaced {}", path.display());
    Ok(())
  }

  fn write_temp(mut file: File, original: &Path, temp: &Path, content: &str) -> std::io::Result<()> {
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    let permissions = fs::metadata(original)?.permissions();
    fs::set_permissions(temp, permissions)
  }

  fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp)
      && e.kind() != std::io::ErrorKind::NotFound
    {
      warn!("Failed to remove temporary file {}: {}", temp.display(), e);
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_read_lines_keeps_terminators() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("a.c");
    fs::write(&path, "one\r\ntwo\n\nlast").expect("write");

    let lines = FileIO::read_lines(&path).expect("read");
    assert_eq!(lines, vec!["one\r\n", "two\n", "\n", "last"]);
  }

  #[test]
  fn test_read_lines_empty_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("empty.c");
    fs::write(&path, "").expect("write");

    assert!(FileIO::read_lines(&path).expect("read").is_empty());
  }

  #[test]
  fn test_read_lines_errors() {
    let dir = tempdir().expect("temp dir");

    let missing = FileIO::read_lines(&dir.path().join("missing.c")).expect_err("missing");
    assert!(matches!(missing, FileIoError::Read { .. }));
    assert!(matches!(missing.outcome(), Outcome::ReadFailed(_)));

    let binary = dir.path().join("blob.c");
    fs::write(&binary, b"\xff\xfe\x00binary").expect("write");
    let err = FileIO::read_lines(&binary).expect_err("binary");
    assert!(matches!(err, FileIoError::Encoding { .. }));
    assert_eq!(err.outcome(), Outcome::NotUtf8);
  }

  #[test]
  fn test_temp_path() {
    assert_eq!(FileIO::temp_path(Path::new("dir/a.c")), PathBuf::from("dir/a.c.tmp"));
  }

  #[test]
  fn test_replace_atomically() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("a.py");
    fs::write(&path, "old\n").expect("write");

    FileIO::replace_atomically(&path, "new\n").expect("replace");

    assert_eq!(fs::read_to_string(&path).expect("read"), "new\n");
    assert!(!FileIO::temp_path(&path).exists());
  }

  #[cfg(unix)]
  #[test]
  fn test_replace_atomically_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("run.sh");
    fs::write(&path, "echo hi\n").expect("write");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");

    FileIO::replace_atomically(&path, "# header\necho hi\n").expect("replace");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
  }

  #[test]
  fn test_replace_atomically_leaves_existing_temp_name_alone() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("a.py");
    let temp = FileIO::temp_path(&path);
    fs::write(&path, "# old\nx = 1\n").expect("write");
    fs::write(&temp, "user data\n").expect("write");

    let err = FileIO::replace_atomically(&path, "# new\nx = 1\n").expect_err("should fail");

    assert!(matches!(err, FileIoError::Write { .. }));
    assert!(matches!(err.outcome(), Outcome::WriteFailed(_)));
    assert_eq!(fs::read_to_string(&path).expect("read"), "# old\nx = 1\n");
    assert_eq!(fs::read_to_string(&temp).expect("read"), "user data\n");
  }

  #[test]
  fn test_replace_atomically_rename_failure_cleans_up() {
    let dir = tempdir().expect("temp dir");
    // A non-empty directory cannot be replaced by a file.
    let target = dir.path().join("target.c");
    fs::create_dir(&target).expect("mkdir");
    fs::write(target.join("inner"), "x").expect("write");

    let err = FileIO::replace_atomically(&target, "content").expect_err("should fail");

    assert!(matches!(err.outcome(), Outcome::WriteFailed(_)));
    assert!(!FileIO::temp_path(&target).exists());
    assert!(target.is_dir());
  }
}
