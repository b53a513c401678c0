// shellkit/src/chain/definition.rs

//! Contains the `Chain<Err>` struct definition and methods for its
//! construction and structural modification.

use crate::core::cancel::CancelSignal;
use crate::core::stage::{FnStage, Stage, StageDef};
use crate::core::stream::ByteStream;
use crate::error::{ShellError, ShellResult};
use std::future::Future;
use std::sync::Arc;
use tracing::{event, Level};

/// An ordered sequence of named stages executed one after another.
///
/// `Err` is the error type the chain's stages return. It must be
/// `From<ShellError>` so the chain can report its own cancellation error in
/// the caller's type; stage errors pass through unchanged.
///
/// Stage names are unique within a chain. Stages are held behind `Arc`, so
/// cloning a chain shares (stateless) stages rather than copying them.
pub struct Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  /// Ordered list of stage descriptors; execution walks it front to back.
  pub(crate) stages: Vec<StageDef<Err>>,
}

impl<Err> Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self { stages: Vec::new() }
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Names of all stages in execution order.
  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, stage_name: &str) -> ShellResult<usize> {
    self
      .stages
      .iter()
      .position(|s| s.name == stage_name)
      .ok_or_else(|| ShellError::StageNotFound {
        stage_name: stage_name.to_string(),
      })
  }

  fn ensure_stage_not_exists(&self, stage_name: &str) -> ShellResult<()> {
    if self.stages.iter().any(|s| s.name == stage_name) {
      return Err(ShellError::DuplicateStage {
        stage_name: stage_name.to_string(),
      });
    }
    Ok(())
  }

  fn make_def(&self, name: String, stage: impl Stage<Err> + 'static) -> ShellResult<StageDef<Err>> {
    self.ensure_stage_not_exists(&name)?;
    Ok(StageDef {
      name,
      stage: Arc::new(stage),
    })
  }

  // --- Basic Stage Manipulation Methods ---

  /// Appends a stage to the end of the chain.
  pub fn add_stage<S: Into<String>>(&mut self, name: S, stage: impl Stage<Err> + 'static) -> ShellResult<()> {
    let def = self.make_def(name.into(), stage)?;
    event!(Level::DEBUG, stage_name = %def.name, index = self.stages.len(), "Stage added.");
    self.stages.push(def);
    Ok(())
  }

  /// Appends an async closure as a stage.
  ///
  /// The closure's error type `E` only needs to convert into the chain's `Err`.
  pub fn add_fn_stage<S, F, Fut, E>(&mut self, name: S, stage_fn: F) -> ShellResult<()>
  where
    S: Into<String>,
    F: Fn(CancelSignal, ByteStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ByteStream, E>> + Send + 'static,
    E: Into<Err> + Send + 'static,
  {
    self.add_stage(name, FnStage::<F, E>::new(stage_fn))
  }

  pub fn insert_before<S: Into<String>>(
    &mut self,
    existing_stage_name: &str,
    new_stage_name: S,
    stage: impl Stage<Err> + 'static,
  ) -> ShellResult<()> {
    let idx = self.position(existing_stage_name)?;
    let def = self.make_def(new_stage_name.into(), stage)?;
    event!(Level::DEBUG, stage_name = %def.name, before = existing_stage_name, "Stage inserted.");
    self.stages.insert(idx, def);
    Ok(())
  }

  pub fn insert_after<S: Into<String>>(
    &mut self,
    existing_stage_name: &str,
    new_stage_name: S,
    stage: impl Stage<Err> + 'static,
  ) -> ShellResult<()> {
    let idx = self.position(existing_stage_name)?;
    let def = self.make_def(new_stage_name.into(), stage)?;
    event!(Level::DEBUG, stage_name = %def.name, after = existing_stage_name, "Stage inserted.");
    self.stages.insert(idx + 1, def);
    Ok(())
  }

  /// Removes a stage by name. Removing an unknown stage is a no-op.
  pub fn remove_stage(&mut self, stage_name: &str) {
    if let Ok(idx) = self.position(stage_name) {
      self.stages.remove(idx);
      event!(Level::DEBUG, %stage_name, "Stage removed.");
    }
  }
}

impl<Err> Default for Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<Err> Clone for Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      stages: self.stages.clone(),
    }
  }
}

impl<Err> std::fmt::Debug for Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Chain").field("stages", &self.stages).finish()
  }
}
