//! dsetup core library
//!
//! Runs a fixed sequence of setup hooks when a container starts and the
//! matching teardown hooks when it stops. Hooks are configured entirely from
//! environment variables read once at startup.
//!
//! The embedding process drives the lifecycle:
//!
//! ```rust,no_run
//! use dsetup_core::LifecycleController;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut controller = LifecycleController::from_env();
//! controller.log();
//! controller.run_init_sequence().await;
//! if controller.oneshot() {
//!     controller.run_exit_sequence().await;
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod lifecycle;

// Re-export commonly used types
pub use config::{EnvSnapshot, LogFormat, LoggingConfig};
pub use error::{HookError, HookResult, HookStage};
pub use hooks::{ActionRunner, CommandSpec, Hook, HookRegistry, ShellRunner};
pub use lifecycle::{LifecycleController, LifecyclePhase, SequenceReport};
