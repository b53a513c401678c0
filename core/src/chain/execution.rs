// shellkit/src/chain/execution.rs

//! Contains `Chain::execute()`, which runs the stages in order against an input stream.

use crate::chain::definition::Chain;
use crate::core::cancel::CancelSignal;
use crate::core::stream::{self, ByteStream};
use crate::error::ShellError;
use tracing::{event, instrument, span, Instrument, Level};

impl<Err> Chain<Err>
where
  Err: std::error::Error + From<ShellError> + Send + Sync + 'static,
{
  /// Runs every stage in order, feeding each stage's output to the next one.
  ///
  /// `cancel` is checked before each stage. Once it has fired, the stage at
  /// the cursor is not invoked and the signal's error (`ShellError::Cancelled`
  /// or `ShellError::DeadlineExceeded`, converted into `Err`) is returned.
  ///
  /// The first stage error is returned exactly as the stage produced it and
  /// no partial output is kept. A chain with no stages returns `input` as is.
  #[instrument(
        name = "Chain::execute",
        skip_all,
        fields(
            chain_error_type = %std::any::type_name::<Err>(),
            num_stages = self.stages.len(),
        ),
        err(Display)
    )]
  pub async fn execute(&self, cancel: &CancelSignal, input: ByteStream) -> Result<ByteStream, Err> {
    event!(Level::DEBUG, "Chain execution starting.");

    let mut current = input;
    for (stage_idx, stage_def) in self.stages.iter().enumerate() {
      if let Some(reason) = cancel.error() {
        event!(
          Level::INFO,
          stage_name = %stage_def.name,
          stage_index = stage_idx,
          "Chain cancelled before stage."
        );
        return Err(Err::from(reason));
      }

      let stage_span = span!(
        Level::INFO,
        "chain_stage",
        stage_name = stage_def.name.as_str(),
        stage_index = stage_idx
      );
      // Attach the span to the future rather than entering it, so it stays
      // correct across the stage's await points.
      current = match stage_def.stage.run(cancel.clone(), current).instrument(stage_span).await {
        Ok(next) => next,
        Err(e) => {
          event!(Level::ERROR, stage_name = %stage_def.name, error = %e, "Stage failed.");
          return Err(e);
        }
      };
    }

    event!(Level::DEBUG, "Chain execution completed successfully.");
    Ok(current)
  }

  /// Runs the chain on `input` text and reads the final stream back as UTF-8.
  pub async fn execute_text(&self, cancel: &CancelSignal, input: impl Into<String>) -> Result<String, Err> {
    let output = self.execute(cancel, stream::from_text(input)).await?;
    stream::read_to_string(output).map_err(Err::from)
  }
}
