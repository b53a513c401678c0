pub mod cancel;
pub mod stage;
pub mod stream;

// Re-export key types for easier access from other shellkit modules (and lib.rs)
pub use cancel::CancelSignal;
pub use stage::{FnStage, Stage, StageDef};
pub use stream::ByteStream;
