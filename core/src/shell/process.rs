// shellkit/src/shell/process.rs

//! External process execution with cooperative cancellation: `exec`, `xargs`
//! and `expr`, all built on [`run`].
//!
//! Children are spawned with `kill_on_drop`, so when the [`CancelSignal`] fires
//! mid-run the child is killed and the call returns the signal's error.

use crate::core::cancel::CancelSignal;
use crate::error::{ShellError, ShellResult};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{event, Level};

/// Description of one external command invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
  pub program: OsString,
  pub args: Vec<OsString>,
  pub working_dir: Option<PathBuf>,
  /// Extra variables layered over the inherited environment.
  pub env: HashMap<OsString, OsString>,
  /// Bytes written to the child's stdin; `None` attaches stdin to null.
  pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
  pub fn new(program: impl Into<OsString>) -> Self {
    Self {
      program: program.into(),
      ..Default::default()
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = Some(dir.into());
    self
  }

  pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
    self.stdin = Some(input.into());
    self
  }

  /// Human-readable `program arg1 arg2` form used in errors and logs.
  pub fn display(&self) -> String {
    std::iter::once(&self.program)
      .chain(self.args.iter())
      .map(|s| s.to_string_lossy().into_owned())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  /// `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Stdout followed by stderr, lossily decoded.
  pub fn combined(&self) -> String {
    let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&self.stderr));
    text
  }

  pub(crate) fn into_failure(self, command: String) -> ShellError {
    ShellError::CommandFailed {
      command,
      code: self.code,
      output: self.combined(),
    }
  }
}

/// Runs `spec` to completion and returns its output whatever the exit status.
///
/// Fails with the signal's error if `cancel` has fired before spawning or
/// while the child is running (the child is killed), and with
/// `ShellError::CommandSpawn` if the program cannot be started.
pub async fn run(cancel: &CancelSignal, spec: &CommandSpec) -> ShellResult<CommandOutput> {
  if let Some(reason) = cancel.error() {
    return Err(reason);
  }

  let command_line = spec.display();
  event!(Level::DEBUG, command = %command_line, "Executing subprocess.");

  let mut cmd = Command::new(&spec.program);
  cmd
    .args(&spec.args)
    .envs(&spec.env)
    .stdin(if spec.stdin.is_some() { Stdio::piped() } else { Stdio::null() })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);
  if let Some(dir) = &spec.working_dir {
    cmd.current_dir(dir);
  }

  let mut child = cmd.spawn().map_err(|source| ShellError::CommandSpawn {
    command: command_line.clone(),
    source,
  })?;

  let stdin_pipe = child.stdin.take();
  let input = spec.stdin.clone();
  let feed_stdin = async move {
    if let (Some(mut pipe), Some(bytes)) = (stdin_pipe, input) {
      match pipe.write_all(&bytes).await {
        // The child may exit without reading all of its input.
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        other => other?,
      }
      // Dropping the pipe closes it and signals EOF to the child.
    }
    Ok::<(), std::io::Error>(())
  };

  let completion = async {
    let (fed, output) = tokio::join!(feed_stdin, child.wait_with_output());
    fed.map_err(|e| ShellError::io(format!("writing stdin of '{}'", command_line), e))?;
    output.map_err(|e| ShellError::io(format!("waiting for '{}'", command_line), e))
  };

  let output = tokio::select! {
    result = completion => result?,
    _ = cancel.cancelled() => {
      event!(Level::INFO, command = %command_line, "Subprocess cancelled, killing child.");
      return Err(cancel.error().unwrap_or(ShellError::Cancelled));
    }
  };

  let result = CommandOutput {
    code: output.status.code(),
    stdout: output.stdout,
    stderr: output.stderr,
  };
  event!(Level::DEBUG, command = %command_line, code = ?result.code, "Subprocess finished.");
  Ok(result)
}

/// Runs `program` with `args` and returns stdout followed by stderr.
/// A non-zero exit status is `ShellError::CommandFailed`.
pub async fn exec<I, S>(cancel: &CancelSignal, program: &str, args: I) -> ShellResult<String>
where
  I: IntoIterator<Item = S>,
  S: Into<OsString>,
{
  let spec = CommandSpec::new(program).args(args);
  let output = run(cancel, &spec).await?;
  if !output.success() {
    return Err(output.into_failure(spec.display()));
  }
  Ok(output.combined())
}

/// Runs `program args... item` once per item, in order, and concatenates the
/// outputs. Stops at the first failing invocation.
pub async fn xargs<S: AsRef<str>>(
  cancel: &CancelSignal,
  items: &[S],
  program: &str,
  args: &[&str],
) -> ShellResult<String> {
  let mut combined = String::new();
  for item in items {
    let invocation = args.iter().copied().chain(std::iter::once(item.as_ref()));
    combined.push_str(&exec(cancel, program, invocation).await?);
  }
  Ok(combined)
}

/// Evaluates an integer expression with the system `expr` utility. The
/// expression is split on whitespace into `expr` operands, e.g. `"3 + 4"`.
pub async fn expr(cancel: &CancelSignal, expression: &str) -> ShellResult<i64> {
  let spec = CommandSpec::new("expr").args(expression.split_whitespace());
  let output = run(cancel, &spec).await?;
  // expr exits with 1 when the result is zero or null; 2 and above are errors.
  if !matches!(output.code, Some(0) | Some(1)) {
    return Err(output.into_failure(spec.display()));
  }
  let text = String::from_utf8_lossy(&output.stdout);
  text
    .trim()
    .parse::<i64>()
    .map_err(|e| ShellError::InvalidArgument(format!("expr produced a non-integer result {:?}: {}", text.trim(), e)))
}
