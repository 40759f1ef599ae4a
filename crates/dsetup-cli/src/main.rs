//! dsetup container entrypoint
//!
//! Configures the container network through hooks read from the environment:
//!
//! - `ROUTES_INIT` / `ROUTES_EXIT`: commands that install and remove routes
//! - `PRE_INIT_HOOK` / `PRE_EXIT_HOOK`: user commands run first
//! - `POST_INIT_HOOK` / `POST_EXIT_HOOK`: user commands run last
//! - IPv4 masquerading is always set up and torn down
//!
//! With `ONESHOT=true` the exit hooks run right after the init hooks and the
//! process exits. Otherwise it waits for SIGTERM, SIGINT or SIGQUIT first.
//!
//! Logging is controlled by `RUST_LOG` and `DSETUP_LOG_FORMAT`
//! (`pretty`, `compact` or `json`).

mod logging;
mod signal_handler;

use anyhow::Result;
use dsetup_core::{EnvSnapshot, LifecycleController, LoggingConfig, ShellRunner};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let env = EnvSnapshot::from_env();
    logging::init(&LoggingConfig::from_env(&env))?;

    let mut controller = LifecycleController::new(&env, ShellRunner::new());
    controller.log();

    // Catch stop requests before any hook runs
    let signals = if controller.oneshot() {
        None
    } else {
        Some(signal_handler::register()?)
    };

    controller.run_init_sequence().await;

    if let Some(signals) = signals {
        info!("Init hooks done, waiting for a termination signal");
        signal_handler::wait_for_termination(signals).await?;
    }

    controller.run_exit_sequence().await;
    info!("Exit hooks done");
    Ok(())
}
