// shellkit/src/shell/mod.rs

//! Stateless shell-style utilities. They are plain functions with no
//! dependency on `Chain` or `ConcurrentMap`; `chain::stages` wraps some of
//! them as ready-made stages.

pub mod env;
pub mod fs;
pub mod io;
pub mod path;
pub mod process;
pub mod text;

pub use env::{env, set_env};
pub use fs::{append_file, cat, cd, find, ls, mkdir, pwd, rm, test, write_file};
pub use io::{echo, echo_to, read_line, read_line_from};
pub use path::{basename, clean, dirname};
pub use process::{exec, expr, run, xargs, CommandOutput, CommandSpec};
pub use text::{awk, cut, grep, head, sed, sort, tail, tr, uniq, wc, WordCount};
