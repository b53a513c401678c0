// src/lib.rs

//! Shellkit: shell-style text and file utilities for Rust, plus two small
//! concurrency building blocks.
//!
//! Shellkit provides:
//!  - A `Chain<Err>` of named async stages that transform a byte stream one
//!    after another, with cooperative cancellation checked between stages.
//!  - Ready-made stages (`grep`, `sed`, `tr`, `sort`, external commands, ...).
//!  - `ConcurrentMap<V>`, a string-keyed map behind a single reader/writer lock.
//!  - Stateless helpers mirroring common commands: `cat`, `ls`, `find`, `grep`,
//!    `cut`, `wc`, `basename`, `exec`, `xargs` and friends.

pub mod chain;
pub mod core;
pub mod error;
pub mod map;
pub mod shell;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::cancel::CancelSignal;
pub use crate::core::stage::{FnStage, Stage, StageDef};
pub use crate::core::stream::{self, ByteStream};

// The chain itself and its built-in stages
pub use crate::chain::definition::Chain;
pub use crate::chain::stages::{CommandStage, TextStage};

pub use crate::map::ConcurrentMap;

pub use crate::error::{ErrorKind, ShellError, ShellResult};

/*
    Core Workflow:
    1. Build a `Chain<MyError>` (MyError: From<ShellError>), or use `ShellError` directly.
    2. Add stages with `.add_fn_stage(name, |cancel, input| async move { ... })`
       or `.add_stage(name, shellkit::chain::stages::grep("pattern")?)`.
    3. Create a `CancelSignal` (optionally `with_timeout`) and share clones of it
       with whoever may need to stop the run.
    4. Call `chain.execute(&signal, shellkit::stream::from_text(input)).await`.
       Cancellation before a stage yields `ShellError::Cancelled` (or
       `DeadlineExceeded`) converted into `MyError`; stage errors come back untouched.
*/
