// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use shellkit::{stream, ByteStream, CancelSignal, ShellError};
use std::future::Future;
use std::pin::Pin;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Shellkit error: {0}")]
  Shell(String), // Store as String for Eq comparison

  #[error("Shellkit cancellation: {0}")]
  Cancelled(String),

  #[error("Test stage failed: {0}")]
  Stage(String),
}

impl From<ShellError> for TestError {
  fn from(err: ShellError) -> Self {
    if err.is_cancellation() {
      TestError::Cancelled(err.to_string())
    } else {
      TestError::Shell(err.to_string())
    }
  }
}

pub type StageFuture = Pin<Box<dyn Future<Output = Result<ByteStream, TestError>> + Send>>;

// --- Common Stage Creators ---

/// A stage appending `marker` to its input text and bumping `counter`.
pub fn create_append_stage(
  marker: &'static str,
  counter: Arc<AtomicUsize>,
) -> impl Fn(CancelSignal, ByteStream) -> StageFuture + Send + Sync + 'static {
  move |_cancel: CancelSignal, input: ByteStream| {
    let counter = counter.clone();
    Box::pin(async move {
      counter.fetch_add(1, Ordering::SeqCst);
      let mut text = stream::read_to_string(input)?;
      text.push_str(marker);
      tracing::debug!(target: "test_stages", %marker, "appended, now '{}'", text);
      Ok::<ByteStream, TestError>(stream::from_text(text))
    }) as StageFuture
  }
}

pub fn create_failing_stage(
  error_message: &'static str,
  counter: Arc<AtomicUsize>,
) -> impl Fn(CancelSignal, ByteStream) -> StageFuture + Send + Sync + 'static {
  move |_cancel: CancelSignal, _input: ByteStream| {
    let counter = counter.clone();
    Box::pin(async move {
      counter.fetch_add(1, Ordering::SeqCst);
      tracing::warn!(target: "test_stages", "failing with: '{}'", error_message);
      Err::<ByteStream, TestError>(TestError::Stage(error_message.to_string()))
    }) as StageFuture
  }
}

/// A stage that cancels the shared signal, then passes its input through.
pub fn create_cancelling_stage(
  counter: Arc<AtomicUsize>,
) -> impl Fn(CancelSignal, ByteStream) -> StageFuture + Send + Sync + 'static {
  move |cancel: CancelSignal, input: ByteStream| {
    let counter = counter.clone();
    Box::pin(async move {
      counter.fetch_add(1, Ordering::SeqCst);
      cancel.cancel();
      Ok::<ByteStream, TestError>(input)
    }) as StageFuture
  }
}

pub fn new_counter() -> Arc<AtomicUsize> {
  Arc::new(AtomicUsize::new(0))
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
  counter.load(Ordering::SeqCst)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shellkit=debug"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
