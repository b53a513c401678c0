// shellkit/examples/basic_chain.rs

use shellkit::chain::stages;
use shellkit::{stream, ByteStream, CancelSignal, Chain, ShellError, ShellResult};
use tracing::info;

const LOG: &str = "\
2024-05-01 INFO  service started
2024-05-01 WARN  disk at 81%
2024-05-02 ERROR upstream timeout
2024-05-02 WARN  disk at 85%
2024-05-03 ERROR upstream timeout";

#[tokio::main]
async fn main() -> ShellResult<()> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Chain Example ---");

  // 1. Create a chain whose stages report ShellError
  let mut chain = Chain::<ShellError>::new();

  // 2. Built-in stages: keep WARN/ERROR lines, drop the date column, dedupe
  chain.add_stage("problems", stages::grep("WARN|ERROR")?)?;
  chain.add_stage("strip_date", stages::cut(" ", vec![2, 3, 4, 5, 6]))?;
  chain.add_stage("sort", stages::sort())?;
  chain.add_stage("dedupe", stages::uniq())?;

  // 3. A custom async stage: number every line
  chain.add_fn_stage("number", |_cancel: CancelSignal, input: ByteStream| async move {
    let text = stream::read_to_string(input)?;
    let numbered = text
      .lines()
      .enumerate()
      .map(|(i, line)| format!("{:>2}. {}", i + 1, line))
      .collect::<Vec<_>>()
      .join("\n");
    Ok::<_, ShellError>(stream::from_text(numbered))
  })?;

  info!("Stages: {:?}", chain.stage_names());

  // 4. Run it
  let report = chain.execute_text(&CancelSignal::new(), LOG).await?;
  for line in report.lines() {
    info!("{}", line);
  }

  assert_eq!(report.lines().count(), 3);
  Ok(())
}
