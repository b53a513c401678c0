// shellkit/src/shell/env.rs

use crate::error::{ShellError, ShellResult};
use tracing::{event, Level};

/// Value of the environment variable `key`, or an empty string when it is
/// unset or not valid Unicode.
pub fn env(key: &str) -> String {
  std::env::var(key).unwrap_or_default()
}

/// Sets an environment variable for the current process.
///
/// Keys that are empty or contain `=` or NUL, and values containing NUL, are
/// rejected instead of reaching `std::env::set_var` (which panics on them).
pub fn set_env(key: &str, value: &str) -> ShellResult<()> {
  if key.is_empty() || key.contains('=') || key.contains('\0') {
    return Err(ShellError::InvalidArgument(format!(
      "invalid environment variable name: {:?}",
      key
    )));
  }
  if value.contains('\0') {
    return Err(ShellError::InvalidArgument(format!(
      "environment variable '{}' value contains NUL",
      key
    )));
  }
  event!(Level::DEBUG, %key, "set_env");
  std::env::set_var(key, value);
  Ok(())
}
