// shellkit/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
  #[error("Invalid regex pattern '{pattern}'. Source: {source}")]
  InvalidRegex {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("I/O error while {context}. Source: {source}")]
  Io {
    context: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("Command '{command}' could not be started. Source: {source}")]
  CommandSpawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Command '{command}' failed (exit code: {code:?}): {output}")]
  CommandFailed {
    command: String,
    code: Option<i32>,
    output: String,
  },

  #[error("Operation cancelled")]
  Cancelled,

  #[error("Operation cancelled: deadline exceeded")]
  DeadlineExceeded,

  #[error("Stage not found: {stage_name}")]
  StageNotFound { stage_name: String },

  #[error("Stage already exists: {stage_name}")]
  DuplicateStage { stage_name: String },

  #[error("Error in user-provided stage. Source: {source}")]
  Stage {
    #[source]
    source: AnyhowError,
  },
}

/// Coarse classification of a [`ShellError`], for callers that only care
/// about which family of failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  InvalidRegex,
  CommandExecution,
  Io,
  InvalidArgument,
  /// Stopped cooperatively, either explicitly or by a deadline.
  Cancelled,
  /// Structural chain misuse (unknown or duplicate stage names).
  Chain,
  Stage,
}

impl ShellError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      ShellError::InvalidRegex { .. } => ErrorKind::InvalidRegex,
      ShellError::Io { .. } => ErrorKind::Io,
      ShellError::InvalidArgument(_) => ErrorKind::InvalidArgument,
      ShellError::CommandSpawn { .. } | ShellError::CommandFailed { .. } => ErrorKind::CommandExecution,
      ShellError::Cancelled | ShellError::DeadlineExceeded => ErrorKind::Cancelled,
      ShellError::StageNotFound { .. } | ShellError::DuplicateStage { .. } => ErrorKind::Chain,
      ShellError::Stage { .. } => ErrorKind::Stage,
    }
  }

  pub fn is_cancellation(&self) -> bool {
    self.kind() == ErrorKind::Cancelled
  }

  pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
    ShellError::Io {
      context: context.into(),
      source,
    }
  }
}

impl From<AnyhowError> for ShellError {
  fn from(err: AnyhowError) -> Self {
    // A ShellError that went through anyhow keeps its own variant instead of
    // being nested inside Stage.
    match err.downcast::<ShellError>() {
      Ok(shell_err) => shell_err,
      Err(err) => ShellError::Stage { source: err },
    }
  }
}

pub type ShellResult<T, E = ShellError> = std::result::Result<T, E>;
