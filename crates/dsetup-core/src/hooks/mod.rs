//! Hook system
//!
//! Hooks are the units of setup and teardown work the entrypoint performs.
//! Each hook has an init action and an exit action, either of which may be
//! absent. Actions are external commands run through an [`ActionRunner`].
//!
//! # Examples
//!
//! ```rust
//! use dsetup_core::config::EnvSnapshot;
//! use dsetup_core::hooks::{Hook, ShellRunner, UserHook};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = EnvSnapshot::from_pairs([("PRE_INIT_HOOK", "true")]);
//! let hook = Hook::from(UserHook::new("pre", "PRE", &env));
//!
//! hook.run_init("pre", &ShellRunner::new()).await?;
//! // PRE_EXIT_HOOK is unset: nothing runs
//! hook.run_exit("pre", &ShellRunner::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod registry;
pub mod runner;
pub mod types;

pub use command::CommandSpec;
pub use registry::HookRegistry;
pub use runner::{ActionRunner, ShellRunner};
pub use types::{Hook, HookAction, IpRouteHook, Nat4Hook, UserHook};
