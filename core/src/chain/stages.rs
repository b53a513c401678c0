// shellkit/src/chain/stages.rs

//! Ready-made stages wrapping the `shell` utilities, usable in any
//! `Chain<Err>` whose `Err: From<ShellError>`.
//!
//! Text stages materialise their whole input (inputs must be UTF-8) and
//! line-oriented ones join their result lines with `'\n'`.

use crate::core::cancel::CancelSignal;
use crate::core::stage::Stage;
use crate::core::stream::{self, ByteStream};
use crate::error::{ShellError, ShellResult};
use crate::shell::process::{self, CommandSpec};
use crate::shell::text;
use async_trait::async_trait;
use std::sync::Arc;

type TextFn = Arc<dyn Fn(&str) -> ShellResult<String> + Send + Sync>;

/// A stage applying a synchronous text transform to its whole input.
#[derive(Clone)]
pub struct TextStage {
  transform: TextFn,
}

impl TextStage {
  pub fn new(transform: impl Fn(&str) -> ShellResult<String> + Send + Sync + 'static) -> Self {
    Self {
      transform: Arc::new(transform),
    }
  }

  /// Applies the transform directly, without a chain.
  pub fn apply(&self, input: &str) -> ShellResult<String> {
    (self.transform)(input)
  }
}

#[async_trait]
impl<Err> Stage<Err> for TextStage
where
  Err: From<ShellError> + Send + 'static,
{
  async fn run(&self, _cancel: CancelSignal, input: ByteStream) -> Result<ByteStream, Err> {
    let text = stream::read_to_string(input)?;
    Ok(stream::from_text(self.apply(&text)?))
  }
}

/// Keeps the lines matching the regular expression `pattern`.
/// The pattern is compiled here, so an invalid one fails before any chain runs.
pub fn grep(pattern: &str) -> ShellResult<TextStage> {
  let re = text::compile(pattern)?;
  Ok(TextStage::new(move |input| Ok(text::grep_regex(&re, input).join("\n"))))
}

pub fn sed(old: impl Into<String>, new: impl Into<String>) -> TextStage {
  let (old, new) = (old.into(), new.into());
  TextStage::new(move |input| Ok(text::sed(input, &old, &new)))
}

/// Character translation; `from` and `to` are validated here.
pub fn tr(from: &str, to: &str) -> ShellResult<TextStage> {
  let table = text::translation_table(from, to)?;
  Ok(TextStage::new(move |input| Ok(text::translate(&table, input))))
}

pub fn head(n: usize) -> TextStage {
  TextStage::new(move |input| Ok(text::head(input, n)))
}

pub fn tail(n: usize) -> TextStage {
  TextStage::new(move |input| Ok(text::tail(input, n)))
}

pub fn sort() -> TextStage {
  TextStage::new(|input| {
    let lines: Vec<&str> = input.split('\n').collect();
    Ok(text::sort(&lines).join("\n"))
  })
}

pub fn uniq() -> TextStage {
  TextStage::new(|input| {
    let lines: Vec<&str> = input.split('\n').collect();
    Ok(text::uniq(&lines).join("\n"))
  })
}

pub fn cut(delimiter: impl Into<String>, fields: Vec<usize>) -> TextStage {
  let delimiter = delimiter.into();
  TextStage::new(move |input| Ok(text::cut(input, &delimiter, &fields).join("\n")))
}

/// A stage that pipes its input into an external command and yields the
/// command's stdout.
///
/// The command is killed if the chain's signal fires while it runs. A non-zero
/// exit status fails the stage with `ShellError::CommandFailed`.
#[derive(Debug, Clone)]
pub struct CommandStage {
  spec: CommandSpec,
}

impl CommandStage {
  /// Any `stdin` already set on `spec` is replaced by the stage input.
  pub fn new(spec: CommandSpec) -> Self {
    Self { spec }
  }
}

pub fn command<I, S>(program: &str, args: I) -> CommandStage
where
  I: IntoIterator<Item = S>,
  S: Into<std::ffi::OsString>,
{
  CommandStage::new(CommandSpec::new(program).args(args))
}

#[async_trait]
impl<Err> Stage<Err> for CommandStage
where
  Err: From<ShellError> + Send + 'static,
{
  async fn run(&self, cancel: CancelSignal, input: ByteStream) -> Result<ByteStream, Err> {
    let bytes = stream::read_to_end(input)?;
    let spec = self.spec.clone().stdin(bytes);
    let output = process::run(&cancel, &spec).await?;
    if !output.success() {
      return Err(output.into_failure(spec.display()).into());
    }
    Ok(stream::from_bytes(output.stdout))
  }
}
