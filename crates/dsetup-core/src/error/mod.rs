//! Error types for hook execution

mod types;

pub use types::{HookError, HookResult, HookStage};
