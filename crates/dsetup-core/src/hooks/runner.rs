//! External action runner
//!
//! Hooks never spawn processes themselves: they hand a [`CommandSpec`] to an
//! [`ActionRunner`]. [`ShellRunner`] is the production implementation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::command::CommandSpec;
use crate::error::{HookError, HookResult, HookStage};

/// Runs the external command behind a hook action
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// Run `command` to completion. Exit code 0 is success.
    async fn run(&self, hook: &str, stage: HookStage, command: &CommandSpec) -> HookResult<()>;
}

/// Runs hook commands as child processes
///
/// Children inherit stdout and stderr so their output lands in the container
/// log next to ours. Stdin is closed.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Create a runner using `sh`
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    /// Use another POSIX shell for [`CommandSpec::Shell`] commands
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        match spec {
            CommandSpec::Shell(line) => {
                let mut cmd = Command::new(&self.shell);
                cmd.args(["-c", line]);
                cmd
            }
            CommandSpec::Exec { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionRunner for ShellRunner {
    async fn run(&self, hook: &str, stage: HookStage, command: &CommandSpec) -> HookResult<()> {
        debug!(hook, %stage, %command, "running hook command");

        let status = self
            .command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| HookError::spawn(hook, stage, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(HookError::exit_status(hook, stage, status.code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_command_success() {
        let runner = ShellRunner::new();
        let result = runner
            .run("pre", HookStage::Init, &CommandSpec::shell("exit 0"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shell_command_exit_code() {
        let runner = ShellRunner::new();
        let err = runner
            .run("post", HookStage::Exit, &CommandSpec::shell("exit 3"))
            .await
            .unwrap_err();

        match err {
            HookError::ExitStatus { hook, stage, code } => {
                assert_eq!(hook, "post");
                assert_eq!(stage, HookStage::Exit);
                assert_eq!(code, Some(3));
            }
            other => panic!("Expected exit status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exec_command() {
        let runner = ShellRunner::new();
        assert!(runner
            .run("nat4", HookStage::Init, &CommandSpec::exec("sh", ["-c", "true"]))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let runner = ShellRunner::new();
        let err = runner
            .run(
                "nat4",
                HookStage::Init,
                &CommandSpec::exec("/nonexistent/dsetup-test-binary", Vec::<String>::new()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Spawn { .. }));
        assert_eq!(err.hook(), "nat4");
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let runner = ShellRunner::new().with_shell("/nonexistent/sh");
        let err = runner
            .run("pre", HookStage::Init, &CommandSpec::shell("true"))
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Spawn { .. }));
    }
}
