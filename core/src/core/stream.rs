// shellkit/src/core/stream.rs

//! The readable byte stream handed from one chain stage to the next, plus
//! helpers for building and draining it.

use crate::error::{ShellError, ShellResult};
use std::io::{Cursor, Read};

/// A readable stream of bytes. Stages consume one and produce another.
pub type ByteStream = Box<dyn Read + Send>;

pub fn from_text(text: impl Into<String>) -> ByteStream {
  Box::new(Cursor::new(text.into().into_bytes()))
}

pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> ByteStream {
  Box::new(Cursor::new(bytes.into()))
}

pub fn empty() -> ByteStream {
  Box::new(std::io::empty())
}

/// Reads the whole stream into memory.
pub fn read_to_end(mut stream: ByteStream) -> ShellResult<Vec<u8>> {
  let mut buf = Vec::new();
  stream
    .read_to_end(&mut buf)
    .map_err(|e| ShellError::io("reading stream", e))?;
  Ok(buf)
}

/// Reads the whole stream as UTF-8 text. Invalid UTF-8 is reported as an I/O error.
pub fn read_to_string(mut stream: ByteStream) -> ShellResult<String> {
  let mut text = String::new();
  stream
    .read_to_string(&mut text)
    .map_err(|e| ShellError::io("reading stream as UTF-8", e))?;
  Ok(text)
}
