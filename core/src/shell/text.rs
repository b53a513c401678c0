// shellkit/src/shell/text.rs

//! Line and field oriented text processing: grep, cut, sed, awk, sort, uniq,
//! wc, tr, head and tail.
//!
//! Inputs are split on `'\n'` only, so a trailing newline yields a final empty line.

use crate::error::{ShellError, ShellResult};
use regex::Regex;
use std::collections::HashMap;

pub(crate) fn compile(pattern: &str) -> ShellResult<Regex> {
  Regex::new(pattern).map_err(|source| ShellError::InvalidRegex {
    pattern: pattern.to_string(),
    source,
  })
}

/// Returns the lines of `text` that match the regular expression `pattern`.
pub fn grep(pattern: &str, text: &str) -> ShellResult<Vec<String>> {
  let re = compile(pattern)?;
  Ok(grep_regex(&re, text))
}

pub(crate) fn grep_regex(re: &Regex, text: &str) -> Vec<String> {
  text
    .split('\n')
    .filter(|line| re.is_match(line))
    .map(str::to_string)
    .collect()
}

/// Selects 1-based `fields` from every line, splitting and re-joining with
/// `delimiter`. Field numbers outside the line (including 0) are ignored, so a
/// line with no selected fields becomes an empty string.
pub fn cut(input: &str, delimiter: &str, fields: &[usize]) -> Vec<String> {
  input
    .split('\n')
    .map(|line| {
      let parts: Vec<&str> = line.split(delimiter).collect();
      fields
        .iter()
        .filter(|&&field| field > 0 && field <= parts.len())
        .map(|&field| parts[field - 1])
        .collect::<Vec<_>>()
        .join(delimiter)
    })
    .collect()
}

/// Replaces every literal occurrence of `old` with `new`.
pub fn sed(input: &str, old: &str, new: &str) -> String {
  input.replace(old, new)
}

/// For every line matching `pattern`, calls `action` with the line's
/// whitespace-separated fields and collects the results.
pub fn awk<F>(input: &str, pattern: &str, mut action: F) -> ShellResult<Vec<String>>
where
  F: FnMut(&[&str]) -> String,
{
  let re = compile(pattern)?;
  Ok(
    input
      .split('\n')
      .filter(|line| re.is_match(line))
      .map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        action(&fields)
      })
      .collect(),
  )
}

/// Returns a sorted copy of `lines` (byte-wise ascending).
pub fn sort<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
  let mut sorted: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
  sorted.sort();
  sorted
}

/// Drops lines equal to the line immediately before them.
pub fn uniq<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
  let mut result: Vec<String> = Vec::with_capacity(lines.len());
  for line in lines {
    let line = line.as_ref();
    if result.last().map_or(true, |prev| prev != line) {
      result.push(line.to_string());
    }
  }
  result
}

/// Line, word and byte counts as reported by [`wc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordCount {
  /// Number of `'\n'` characters.
  pub lines: usize,
  pub words: usize,
  pub bytes: usize,
}

pub fn wc(input: &str) -> WordCount {
  WordCount {
    lines: input.matches('\n').count(),
    words: input.split_whitespace().count(),
    bytes: input.len(),
  }
}

/// Translates every character of `from` to the character at the same position in `to`.
///
/// Both sets must have the same number of characters. When a character appears
/// more than once in `from`, its last mapping wins.
pub fn tr(input: &str, from: &str, to: &str) -> ShellResult<String> {
  let table = translation_table(from, to)?;
  Ok(translate(&table, input))
}

pub(crate) fn translation_table(from: &str, to: &str) -> ShellResult<HashMap<char, char>> {
  if from.chars().count() != to.chars().count() {
    return Err(ShellError::InvalidArgument(
      "'from' and 'to' must have the same length".to_string(),
    ));
  }
  Ok(from.chars().zip(to.chars()).collect())
}

pub(crate) fn translate(table: &HashMap<char, char>, input: &str) -> String {
  input.chars().map(|c| *table.get(&c).unwrap_or(&c)).collect()
}

/// The first `n` lines of `input`.
pub fn head(input: &str, n: usize) -> String {
  input.split('\n').take(n).collect::<Vec<_>>().join("\n")
}

/// The last `n` lines of `input`. A trailing newline counts as an empty last line.
pub fn tail(input: &str, n: usize) -> String {
  let lines: Vec<&str> = input.split('\n').collect();
  let start = lines.len().saturating_sub(n);
  lines[start..].join("\n")
}
