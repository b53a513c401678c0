// shellkit/examples/chain_cancel.rs

use shellkit::{stream, ByteStream, CancelSignal, Chain, ShellError};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{error, info};

type StageFuture = Pin<Box<dyn Future<Output = Result<ByteStream, ShellError>> + Send>>;

// Each stage takes 40ms and ignores the signal itself; the chain checks it between stages.
fn slow_stage(label: &'static str) -> impl Fn(CancelSignal, ByteStream) -> StageFuture + Send + Sync {
  move |_cancel: CancelSignal, input: ByteStream| {
    Box::pin(async move {
      info!("{} running", label);
      tokio::time::sleep(Duration::from_millis(40)).await;
      let mut text = stream::read_to_string(input)?;
      text.push_str(label);
      Ok::<ByteStream, ShellError>(stream::from_text(text))
    }) as StageFuture
  }
}

#[tokio::main]
async fn main() -> Result<(), ShellError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Chain Cancellation Example ---");

  let mut chain = Chain::<ShellError>::new();
  for label in ["one ", "two ", "three ", "four "] {
    chain.add_fn_stage(label.trim(), slow_stage(label))?;
  }

  // Explicit cancel from another task while the second stage runs.
  let cancel = CancelSignal::new();
  let trigger = cancel.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(60)).await;
    info!("Requesting cancellation...");
    trigger.cancel();
  });

  match chain.execute(&cancel, stream::empty()).await {
    Err(ShellError::Cancelled) => info!("Chain stopped cooperatively, as expected."),
    Err(other) => error!("Unexpected error: {}", other),
    Ok(_) => error!("Chain completed, but was expected to be cancelled!"),
  }

  // A deadline-driven signal behaves the same way without any other task.
  let deadline = CancelSignal::with_timeout(Duration::from_millis(100));
  match chain.execute(&deadline, stream::empty()).await {
    Err(ShellError::DeadlineExceeded) => info!("Chain stopped at its deadline, as expected."),
    Err(other) => error!("Unexpected error: {}", other),
    Ok(_) => error!("Chain completed, but was expected to hit its deadline!"),
  }

  Ok(())
}
