// shellkit/src/core/stage.rs

//! Defines the `Stage<Err>` extension point, the closure adapter `FnStage`, and
//! `StageDef`, the named descriptor a chain owns for each of its stages.

use crate::core::cancel::CancelSignal;
use crate::core::stream::ByteStream;
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A single transform step: consumes a stream, produces a new one.
///
/// `cancel` is the signal of the enclosing `Chain::execute` call. The chain only
/// checks it between stages; a long-running stage that wants finer-grained
/// cancellation must watch it itself.
#[async_trait]
pub trait Stage<Err>: Send + Sync
where
  Err: Send + 'static,
{
  async fn run(&self, cancel: CancelSignal, input: ByteStream) -> Result<ByteStream, Err>;
}

/// Adapts an async closure `Fn(CancelSignal, ByteStream) -> Future<Output = Result<ByteStream, E>>`
/// into a [`Stage<Err>`], converting `E` into `Err`.
pub struct FnStage<F, E> {
  f: F,
  _phantom_err: PhantomData<fn() -> E>,
}

impl<F, E> FnStage<F, E> {
  pub fn new(f: F) -> Self {
    Self {
      f,
      _phantom_err: PhantomData,
    }
  }
}

#[async_trait]
impl<F, Fut, E, Err> Stage<Err> for FnStage<F, E>
where
  F: Fn(CancelSignal, ByteStream) -> Fut + Send + Sync,
  Fut: Future<Output = Result<ByteStream, E>> + Send + 'static,
  E: Into<Err> + Send + 'static,
  Err: Send + 'static,
{
  async fn run(&self, cancel: CancelSignal, input: ByteStream) -> Result<ByteStream, Err> {
    (self.f)(cancel, input).await.map_err(Into::into)
  }
}

/// A named stage owned by a chain.
pub struct StageDef<Err: Send + 'static> {
  pub name: String,
  pub stage: Arc<dyn Stage<Err>>,
}

impl<Err: Send + 'static> Clone for StageDef<Err> {
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      stage: Arc::clone(&self.stage),
    }
  }
}

// `dyn Stage` has no Debug, so only the name is shown.
impl<Err: Send + 'static> std::fmt::Debug for StageDef<Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StageDef").field("name", &self.name).finish()
  }
}
