// shellkit/examples/error_handling.rs

use shellkit::chain::stages;
use shellkit::{stream, ByteStream, CancelSignal, Chain, ShellError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Input rejected: {0}")]
  Rejected(String),

  #[error("Shellkit error during chain execution: {0}")]
  Shell(#[from] ShellError), // Lets the chain report cancellation and built-in stage failures
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: A custom stage returns an application error
  info!("\nScenario 1: Stage returns a custom error");
  run_chain_with_stage_error().await;

  // Scenario 2: A built-in stage fails with a ShellError
  info!("\nScenario 2: Built-in command stage fails");
  run_chain_with_command_failure().await;
}

async fn run_chain_with_stage_error() {
  let after_runs = Arc::new(AtomicUsize::new(0));
  let mut chain = Chain::<ExampleAppError>::new();

  chain.add_stage("lowercase", stages::tr("ABC", "abc").unwrap()).unwrap();
  chain
    .add_fn_stage("validate", |_cancel: CancelSignal, input: ByteStream| async move {
      let text = stream::read_to_string(input)?;
      if text.contains("forbidden") {
        return Err(ExampleAppError::Rejected(format!("{} bytes of forbidden input", text.len())));
      }
      Ok(stream::from_text(text))
    })
    .unwrap();
  let counter = after_runs.clone();
  chain
    .add_fn_stage("after", move |_cancel: CancelSignal, input: ByteStream| {
      let counter = counter.clone();
      async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ExampleAppError>(input)
      }
    })
    .unwrap();

  match chain.execute_text(&CancelSignal::new(), "some forbidden ABC").await {
    Ok(output) => error!("Chain unexpectedly succeeded: {}", output),
    Err(ExampleAppError::Rejected(msg)) => {
      info!("Chain failed as expected: {}", msg);
    }
    Err(e) => error!("Unexpected error type: {:?}", e),
  }
  // The stage after the failing one never ran.
  assert_eq!(after_runs.load(Ordering::SeqCst), 0);
}

async fn run_chain_with_command_failure() {
  let mut chain = Chain::<ExampleAppError>::new();
  chain
    .add_stage("failing_command", stages::command("sh", ["-c", "echo broken >&2; exit 4"]))
    .unwrap();

  match chain.execute(&CancelSignal::new(), stream::from_text("input")).await {
    Err(ExampleAppError::Shell(ShellError::CommandFailed { command, code, output })) => {
      info!("Command '{}' failed with {:?}: {}", command, code, output.trim());
      assert_eq!(code, Some(4));
    }
    Err(e) => error!("Expected CommandFailed, got {:?}", e),
    Ok(_) => error!("Expected CommandFailed, but chain completed"),
  }
}
