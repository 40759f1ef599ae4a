//! Lifecycle controller
//!
//! Owns the hook registry and runs hooks in a fixed order at init and at
//! exit. A failing hook is logged and the sequence carries on with the next
//! one: a partially configured network is preferred over an entrypoint that
//! dies on one bad hook.

use tracing::{debug, error, info};

use super::phase::LifecyclePhase;
use crate::config::EnvSnapshot;
use crate::error::HookStage;
use crate::hooks::registry::{IPROUTE, NAT4, POST, PRE};
use crate::hooks::{ActionRunner, HookRegistry, ShellRunner};

/// Init order: routes go in before the NAT rules layered on top of them
pub const INIT_SEQUENCE: [&str; 4] = [PRE, IPROUTE, NAT4, POST];

/// Exit order: NAT rules come out before the routes they may reference.
/// `pre` and `post` keep their ends in both sequences.
pub const EXIT_SEQUENCE: [&str; 4] = [PRE, NAT4, IPROUTE, POST];

/// What happened during one sequence run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    /// Hooks that were invoked, in order
    pub executed: Vec<String>,
    /// Hooks whose action failed, in order
    pub failed: Vec<String>,
}

impl SequenceReport {
    /// Whether every invoked hook succeeded
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives the init and exit hook sequences
pub struct LifecycleController<R = ShellRunner> {
    registry: HookRegistry,
    runner: R,
    oneshot: bool,
    phase: LifecyclePhase,
}

impl LifecycleController<ShellRunner> {
    /// Build from the current process environment
    pub fn from_env() -> Self {
        Self::new(&EnvSnapshot::from_env(), ShellRunner::new())
    }
}

impl<R: ActionRunner> LifecycleController<R> {
    /// Build the built-in hooks from `env`, running their commands with `runner`
    pub fn new(env: &EnvSnapshot, runner: R) -> Self {
        Self::with_registry(HookRegistry::builtin(env), env.oneshot(), runner)
    }

    pub(crate) fn with_registry(registry: HookRegistry, oneshot: bool, runner: R) -> Self {
        Self {
            registry,
            runner,
            oneshot,
            phase: LifecyclePhase::Initializing,
        }
    }

    /// Whether exit hooks should run right after init hooks
    pub fn oneshot(&self) -> bool {
        self.oneshot
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// The runner hook commands go through
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run init hooks: pre, iproute, nat4, post
    pub async fn run_init_sequence(&mut self) -> SequenceReport {
        let report = self.run_sequence(HookStage::Init, &INIT_SEQUENCE).await;
        self.phase = LifecyclePhase::Running;
        report
    }

    /// Run exit hooks: pre, nat4, iproute, post
    pub async fn run_exit_sequence(&mut self) -> SequenceReport {
        self.phase = LifecyclePhase::Terminating;
        self.run_sequence(HookStage::Exit, &EXIT_SEQUENCE).await
    }

    async fn run_sequence(&self, stage: HookStage, order: &[&str]) -> SequenceReport {
        info!("Running {} hooks", stage);
        let mut report = SequenceReport::default();

        for &name in order {
            let Some(hook) = self.registry.lookup(name) else {
                debug!(hook = name, "hook not registered, skipping");
                continue;
            };

            let action = match stage {
                HookStage::Init => hook.init_action(),
                HookStage::Exit => hook.exit_action(),
            };
            if !action.is_configured() {
                debug!(hook = name, %stage, "{} not configured, skipping", action.label());
                continue;
            }

            let result = match stage {
                HookStage::Init => hook.run_init(name, &self.runner).await,
                HookStage::Exit => hook.run_exit(name, &self.runner).await,
            };
            report.executed.push(name.to_string());

            if let Err(e) = result {
                error!("Error while running {} {} hook: {}", name, stage, e);
                report.failed.push(name.to_string());
            }
        }

        report
    }

    /// Log the mode and every configured hook action
    pub fn log(&self) {
        for line in self.summary() {
            info!("{}", line);
        }
    }

    /// Lines emitted by [`log`](Self::log)
    pub fn summary(&self) -> Vec<String> {
        let mode = if self.oneshot { "enabled" } else { "disabled" };
        let mut lines = vec![
            "Current configuration:".to_string(),
            format!("  - mode oneshot is {}", mode),
        ];
        for (_, hook) in self.registry.iter_sorted() {
            lines.extend(hook.describe().into_iter().map(|s| format!("  - {}", s)));
        }
        lines
    }
}
