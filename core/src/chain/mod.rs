// shellkit/src/chain/mod.rs

//! Defines the `Chain<Err>` struct, its construction, modification, and execution
//! logic, plus ready-made stages built on the shell text utilities.

pub mod definition;
pub mod execution;
pub mod stages;

// Re-export the main Chain struct
pub use definition::Chain;
