//! Termination signal handling
//!
//! Outside one-shot mode the entrypoint sits idle after the init hooks and
//! only runs the exit hooks once the container runtime asks it to stop.

use anyhow::{Context, Result};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Signals that trigger the exit sequence
pub const TERMINATION_SIGNALS: [i32; 3] = [SIGTERM, SIGINT, SIGQUIT];

/// Start catching [`TERMINATION_SIGNALS`].
///
/// Signals delivered from here on are queued in the returned stream, so a
/// stop request that arrives while init hooks are still running is not lost.
pub fn register() -> Result<Signals> {
    Signals::new(TERMINATION_SIGNALS).context("failed to register signal handlers")
}

/// Wait until one of [`TERMINATION_SIGNALS`] is delivered
pub async fn wait_for_termination(mut signals: Signals) -> Result<i32> {
    let handle = signals.handle();

    let signal = signals
        .next()
        .await
        .context("signal stream closed before a termination signal arrived")?;
    handle.close();

    info!("Received signal {}", signal_name(signal));
    Ok(signal)
}

fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGTERM => "SIGTERM",
        SIGINT => "SIGINT",
        SIGQUIT => "SIGQUIT",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(signal_name(SIGTERM), "SIGTERM");
        assert_eq!(signal_name(SIGINT), "SIGINT");
        assert_eq!(signal_name(SIGQUIT), "SIGQUIT");
        assert_eq!(signal_name(0), "unknown");
    }

    #[tokio::test]
    async fn test_signal_before_wait_is_not_lost() {
        let signals = register().unwrap();
        // delivered while init hooks would still be running
        signal_hook::low_level::raise(SIGQUIT).unwrap();

        let signal = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            wait_for_termination(signals),
        )
        .await
        .expect("queued signal was not observed")
        .unwrap();
        assert_eq!(signal, SIGQUIT);
    }
}
