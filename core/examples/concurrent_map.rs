// shellkit/examples/concurrent_map.rs

use shellkit::shell;
use shellkit::{CancelSignal, ConcurrentMap, ShellResult};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> ShellResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Concurrent Map Example ---");

  // Word counts of a few commands' output, gathered by parallel tasks.
  let counts: Arc<ConcurrentMap<shell::WordCount>> = Arc::new(ConcurrentMap::new());
  let cancel = CancelSignal::new();

  let mut tasks = Vec::new();
  for (key, program, args) in [
    ("echo", "echo", vec!["the quick brown fox"]),
    ("uname", "uname", vec!["-s"]),
    ("env_path", "sh", vec!["-c", "echo \"$PATH\" | tr ':' '\\n'"]),
  ] {
    let counts = Arc::clone(&counts);
    let cancel = cancel.clone();
    tasks.push(tokio::spawn(async move {
      let output = shell::exec(&cancel, program, args).await?;
      counts.set(key, shell::wc(&output));
      ShellResult::<()>::Ok(())
    }));
  }
  for task in tasks {
    task.await.map_err(|e| shellkit::ShellError::InvalidArgument(format!("task failed: {}", e)))??;
  }

  for key in ["echo", "uname", "env_path", "missing"] {
    let (wc, found) = counts.get_or_default(key);
    info!("{:<9} found={:<5} lines={} words={} bytes={}", key, found, wc.lines, wc.words, wc.bytes);
  }

  assert_eq!(counts.get("echo").map(|wc| wc.words), Some(4));
  counts.delete("echo");
  assert!(counts.get("echo").is_none());
  Ok(())
}
