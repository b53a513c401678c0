// shellkit/src/core/cancel.rs

//! Defines `CancelSignal`, the shared write-once stop request observed by chains
//! and by cancellable process helpers.

use crate::error::ShellError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// A shared, write-once cancellation flag.
///
/// Clones observe the same state. Once cancelled (explicitly via [`cancel`](Self::cancel)
/// or because the optional deadline has passed) the signal never resets.
///
/// The signal itself performs no scheduling: a deadline is evaluated lazily
/// whenever the signal is polled, and only [`cancelled`](Self::cancelled)
/// sleeps until it.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal(Arc<CancelState>);

#[derive(Debug, Default)]
struct CancelState {
  cancelled: AtomicBool,
  deadline: Option<Instant>,
  notify: Notify,
}

impl CancelSignal {
  pub fn new() -> Self {
    Self::default()
  }

  /// A signal that fires on its own once `timeout` has elapsed from now.
  pub fn with_timeout(timeout: Duration) -> Self {
    Self::with_deadline(Instant::now() + timeout)
  }

  pub fn with_deadline(deadline: Instant) -> Self {
    CancelSignal(Arc::new(CancelState {
      cancelled: AtomicBool::new(false),
      deadline: Some(deadline),
      notify: Notify::new(),
    }))
  }

  pub fn deadline(&self) -> Option<Instant> {
    self.0.deadline
  }

  /// Requests cancellation. Idempotent.
  pub fn cancel(&self) {
    if !self.0.cancelled.swap(true, Ordering::SeqCst) {
      tracing::debug!("Cancellation requested.");
    }
    self.0.notify.notify_waiters();
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.cancelled.load(Ordering::SeqCst) || self.deadline_passed()
  }

  /// The error describing why the signal fired, or `None` while it has not.
  /// An explicit cancel takes precedence over an expired deadline.
  pub fn error(&self) -> Option<ShellError> {
    if self.0.cancelled.load(Ordering::SeqCst) {
      Some(ShellError::Cancelled)
    } else if self.deadline_passed() {
      Some(ShellError::DeadlineExceeded)
    } else {
      None
    }
  }

  /// Resolves once the signal has fired.
  pub async fn cancelled(&self) {
    loop {
      // Register interest before checking the flag so a concurrent
      // `cancel()` between the check and the await is not lost.
      let notified = self.0.notify.notified();
      if self.is_cancelled() {
        return;
      }
      match self.0.deadline {
        Some(deadline) => {
          tokio::select! {
            _ = notified => {}
            _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {}
          }
        }
        None => notified.await,
      }
    }
  }

  fn deadline_passed(&self) -> bool {
    self.0.deadline.map_or(false, |deadline| Instant::now() >= deadline)
  }
}
