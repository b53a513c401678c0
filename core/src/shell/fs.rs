// shellkit/src/shell/fs.rs

//! File and directory helpers: cat, ls, mkdir, rm, pwd, cd, write/append,
//! find and the file/string predicates of `test`.

use crate::error::{ShellError, ShellResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{event, Level};
use walkdir::WalkDir;

/// Reads a whole file as UTF-8 text.
pub fn cat<P: AsRef<Path>>(path: P) -> ShellResult<String> {
  let path = path.as_ref();
  fs::read_to_string(path).map_err(|e| ShellError::io(format!("reading '{}'", path.display()), e))
}

/// Names of the entries in `dir`, sorted by name.
pub fn ls<P: AsRef<Path>>(dir: P) -> ShellResult<Vec<String>> {
  let dir = dir.as_ref();
  let listing_err = |e| ShellError::io(format!("listing '{}'", dir.display()), e);
  let mut names = Vec::new();
  for entry in fs::read_dir(dir).map_err(listing_err)? {
    let entry = entry.map_err(listing_err)?;
    names.push(entry.file_name().to_string_lossy().into_owned());
  }
  names.sort();
  Ok(names)
}

/// Creates `path` and any missing parents. An existing directory is not an error.
pub fn mkdir<P: AsRef<Path>>(path: P) -> ShellResult<()> {
  let path = path.as_ref();
  event!(Level::DEBUG, path = %path.display(), "mkdir");
  fs::create_dir_all(path).map_err(|e| ShellError::io(format!("creating directory '{}'", path.display()), e))
}

/// Removes a file, or a directory and everything below it. A missing path is not an error.
pub fn rm<P: AsRef<Path>>(path: P) -> ShellResult<()> {
  let path = path.as_ref();
  let metadata = match fs::symlink_metadata(path) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
    Err(e) => return Err(ShellError::io(format!("inspecting '{}'", path.display()), e)),
  };
  event!(Level::DEBUG, path = %path.display(), is_dir = metadata.is_dir(), "rm");
  let result = if metadata.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  };
  result.map_err(|e| ShellError::io(format!("removing '{}'", path.display()), e))
}

pub fn pwd() -> ShellResult<PathBuf> {
  std::env::current_dir().map_err(|e| ShellError::io("reading the current directory", e))
}

/// Changes the process-wide working directory.
pub fn cd<P: AsRef<Path>>(dir: P) -> ShellResult<()> {
  let dir = dir.as_ref();
  event!(Level::DEBUG, dir = %dir.display(), "cd");
  std::env::set_current_dir(dir).map_err(|e| ShellError::io(format!("changing directory to '{}'", dir.display()), e))
}

/// Writes `content` to `path`, creating or truncating it.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> ShellResult<()> {
  let path = path.as_ref();
  fs::write(path, content).map_err(|e| ShellError::io(format!("writing '{}'", path.display()), e))
}

/// Appends `content` to `path`, creating it if needed.
pub fn append_file<P: AsRef<Path>>(path: P, content: &str) -> ShellResult<()> {
  let path = path.as_ref();
  let append_err = |e| ShellError::io(format!("appending to '{}'", path.display()), e);
  let mut file = OpenOptions::new()
    .append(true)
    .create(true)
    .open(path)
    .map_err(append_err)?;
  file.write_all(content.as_bytes()).map_err(append_err)
}

/// Walks `root` (itself included) in lexical order and returns every path
/// whose final component matches the glob `pattern`.
pub fn find<P: AsRef<Path>>(root: P, pattern: &str) -> ShellResult<Vec<PathBuf>> {
  let root = root.as_ref();
  let glob = glob::Pattern::new(pattern)
    .map_err(|e| ShellError::InvalidArgument(format!("invalid glob pattern '{}': {}", pattern, e)))?;

  let mut matches = Vec::new();
  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let context = format!("walking '{}'", root.display());
      ShellError::io(context, e.into())
    })?;
    let base = base_name(entry.path());
    if glob.matches(&base) {
      matches.push(entry.into_path());
    }
  }
  Ok(matches)
}

// Final path component, falling back to the whole path for roots like "/" or ".".
fn base_name(path: &Path) -> String {
  match path.file_name() {
    Some(name) => name.to_string_lossy().into_owned(),
    None => path.to_string_lossy().into_owned(),
  }
}

/// Evaluates a `test`-style condition.
///
/// Supported: `-e PATH` (exists), `-f PATH` (exists and is not a directory),
/// `-d PATH` (is a directory), `-z STR` (empty), `-n STR` (non-empty),
/// `= A B` and `!= A B`.
pub fn test<S: AsRef<str>>(condition: &str, args: &[S]) -> ShellResult<bool> {
  let arg = |idx| operand(condition, args, idx);
  match condition {
    "-e" => Ok(fs::metadata(arg(0)?).is_ok()),
    "-f" => Ok(fs::metadata(arg(0)?).map_or(false, |m| !m.is_dir())),
    "-d" => Ok(fs::metadata(arg(0)?).map_or(false, |m| m.is_dir())),
    "-z" => Ok(arg(0)?.is_empty()),
    "-n" => Ok(!arg(0)?.is_empty()),
    "=" => Ok(arg(0)? == arg(1)?),
    "!=" => Ok(arg(0)? != arg(1)?),
    other => Err(ShellError::InvalidArgument(format!(
      "unsupported test condition: {}",
      other
    ))),
  }
}

fn operand<'a, S: AsRef<str>>(condition: &str, args: &'a [S], idx: usize) -> ShellResult<&'a str> {
  args.get(idx).map(AsRef::as_ref).ok_or_else(|| {
    ShellError::InvalidArgument(format!("test condition '{}' is missing operand {}", condition, idx + 1))
  })
}
