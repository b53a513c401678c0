// shellkit/src/shell/io.rs

//! Console helpers: `echo` and `read_line`.

use crate::error::{ShellError, ShellResult};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Prints `args` to stdout separated by single spaces, followed by a newline.
pub fn echo<I>(args: I) -> ShellResult<()>
where
  I: IntoIterator,
  I::Item: Display,
{
  let stdout = std::io::stdout();
  let mut handle = stdout.lock();
  echo_to(&mut handle, args)
}

/// Like [`echo`], writing to `writer` instead of stdout.
pub fn echo_to<W, I>(writer: &mut W, args: I) -> ShellResult<()>
where
  W: Write + ?Sized,
  I: IntoIterator,
  I::Item: Display,
{
  let line = args
    .into_iter()
    .map(|arg| arg.to_string())
    .collect::<Vec<_>>()
    .join(" ");
  writeln!(writer, "{}", line).map_err(|e| ShellError::io("writing echo output", e))
}

/// Reads one line from stdin with surrounding whitespace trimmed.
pub fn read_line() -> ShellResult<String> {
  let stdin = std::io::stdin();
  let mut handle = stdin.lock();
  read_line_from(&mut handle)
}

/// Reads one line from `reader` with surrounding whitespace trimmed.
///
/// A final line without a trailing newline is returned normally; end of input
/// before any byte is read is an `UnexpectedEof` I/O error.
pub fn read_line_from<R: BufRead + ?Sized>(reader: &mut R) -> ShellResult<String> {
  let mut line = String::new();
  let read = reader
    .read_line(&mut line)
    .map_err(|e| ShellError::io("reading a line", e))?;
  if read == 0 {
    return Err(ShellError::io(
      "reading a line",
      std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "end of input"),
    ));
  }
  Ok(line.trim().to_string())
}
