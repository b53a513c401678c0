// tests/process_tests.rs
mod common;

use common::*;
use shellkit::shell::{self, CommandSpec};
use shellkit::{CancelSignal, ErrorKind, ShellError};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_exec_returns_combined_output() {
  setup_tracing();
  let cancel = CancelSignal::new();
  assert_eq!(shell::exec(&cancel, "echo", ["hello", "world"]).await.unwrap(), "hello world\n");

  let both = shell::exec(&cancel, "sh", ["-c", "echo out; echo err 1>&2"]).await.unwrap();
  assert_eq!(both, "out\nerr\n");
}

#[tokio::test]
async fn test_exec_failure_kinds() {
  setup_tracing();
  let cancel = CancelSignal::new();

  let err = shell::exec(&cancel, "sh", ["-c", "echo nope 1>&2; exit 2"]).await.unwrap_err();
  match &err {
    ShellError::CommandFailed { code, output, .. } => {
      assert_eq!(*code, Some(2));
      assert_eq!(output, "nope\n");
    }
    other => panic!("Expected CommandFailed, got {:?}", other),
  }
  assert_eq!(err.kind(), ErrorKind::CommandExecution);

  let err = shell::exec(&cancel, "shellkit-definitely-not-a-program", Vec::<&str>::new())
    .await
    .unwrap_err();
  assert!(matches!(err, ShellError::CommandSpawn { .. }));
  assert_eq!(err.kind(), ErrorKind::CommandExecution);
}

#[tokio::test]
async fn test_exec_respects_pre_cancelled_signal() {
  setup_tracing();
  let cancel = CancelSignal::new();
  cancel.cancel();
  let err = shell::exec(&cancel, "echo", ["never"]).await.unwrap_err();
  assert!(matches!(err, ShellError::Cancelled));
}

#[tokio::test]
async fn test_running_command_is_killed_on_cancel() {
  setup_tracing();
  let cancel = CancelSignal::new();
  let trigger = cancel.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(50)).await;
    trigger.cancel();
  });

  let started = Instant::now();
  let err = shell::exec(&cancel, "sleep", ["5"]).await.unwrap_err();
  assert!(err.is_cancellation());
  assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_running_command_stops_at_deadline() {
  setup_tracing();
  let cancel = CancelSignal::with_timeout(Duration::from_millis(50));
  let err = shell::exec(&cancel, "sleep", ["5"]).await.unwrap_err();
  assert!(matches!(err, ShellError::DeadlineExceeded));
}

#[tokio::test]
async fn test_run_with_stdin_env_and_dir() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let spec = CommandSpec::new("sh")
    .arg("-c")
    .arg("cat; printf ' %s ' \"$SHELLKIT_GREETING\"; pwd")
    .env("SHELLKIT_GREETING", "hi")
    .current_dir(dir.path())
    .stdin("piped");

  let output = shell::run(&CancelSignal::new(), &spec).await.unwrap();
  assert!(output.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  let (prefix, printed_dir) = stdout.split_at(stdout.find(" hi ").unwrap() + 4);
  assert_eq!(prefix, "piped hi ");
  assert_eq!(
    std::path::Path::new(printed_dir.trim()).canonicalize().unwrap(),
    dir.path().canonicalize().unwrap()
  );
}

#[tokio::test]
async fn test_xargs_runs_once_per_item() {
  setup_tracing();
  let cancel = CancelSignal::new();
  let out = shell::xargs(&cancel, &["a", "b", "c"], "echo", &["item:"]).await.unwrap();
  assert_eq!(out, "item: a\nitem: b\nitem: c\n");

  let out = shell::xargs::<&str>(&cancel, &[], "echo", &[]).await.unwrap();
  assert_eq!(out, "");

  let err = shell::xargs(&cancel, &["0", "3", "0"], "sh", &["-c", "exit \"$0\""])
    .await
    .unwrap_err();
  assert!(matches!(err, ShellError::CommandFailed { code: Some(3), .. }));
}

#[tokio::test]
async fn test_expr_evaluates_integers() {
  setup_tracing();
  let cancel = CancelSignal::new();
  assert_eq!(shell::expr(&cancel, "3 + 4").await.unwrap(), 7);
  assert_eq!(shell::expr(&cancel, "6 * 7").await.unwrap(), 42);
  // expr exits with status 1 for a zero result; still a valid value.
  assert_eq!(shell::expr(&cancel, "2 - 2").await.unwrap(), 0);
  assert_eq!(shell::expr(&cancel, "abc").await.unwrap_err().kind(), ErrorKind::InvalidArgument);
  assert_eq!(shell::expr(&cancel, "1 +").await.unwrap_err().kind(), ErrorKind::CommandExecution);
}
