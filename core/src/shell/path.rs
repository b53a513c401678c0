// shellkit/src/shell/path.rs

//! Lexical `/`-separated path helpers. None of these touch the filesystem.

/// The last element of `path`. Trailing slashes are ignored; an empty path
/// yields `"."` and a path of only slashes yields `"/"`.
pub fn basename(path: &str) -> String {
  if path.is_empty() {
    return ".".to_string();
  }
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() {
    return "/".to_string();
  }
  match trimmed.rfind('/') {
    Some(idx) => trimmed[idx + 1..].to_string(),
    None => trimmed.to_string(),
  }
}

/// Everything but the last element of `path`, lexically cleaned.
///
/// `"a/b/c"` gives `"a/b"`, `"a/b/"` gives `"a/b"`, `"file"` gives `"."` and `"/x"` gives `"/"`.
pub fn dirname(path: &str) -> String {
  let dir = match path.rfind('/') {
    Some(idx) => &path[..=idx],
    None => "",
  };
  clean(dir)
}

/// Shortest path equivalent to `path` by purely lexical processing: repeated
/// slashes collapse, `.` elements drop, `..` consumes the preceding element
/// (and is discarded directly under the root). An empty result becomes `"."`.
pub fn clean(path: &str) -> String {
  if path.is_empty() {
    return ".".to_string();
  }
  let rooted = path.starts_with('/');
  let mut parts: Vec<&str> = Vec::new();
  for element in path.split('/') {
    match element {
      "" | "." => {}
      ".." => match parts.last() {
        Some(&last) if last != ".." => {
          parts.pop();
        }
        _ if rooted => {}
        _ => parts.push(".."),
      },
      other => parts.push(other),
    }
  }

  let joined = parts.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => format!("/{}", joined),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}
