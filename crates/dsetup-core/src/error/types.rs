//! Core error types for hook execution

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias for a single hook action
pub type HookResult<T> = Result<T, HookError>;

/// Lifecycle stage a hook action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Container startup
    Init,
    /// Container teardown
    Exit,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// The external action of a hook failed.
///
/// This is the only failure a hook reports. The lifecycle controller logs it
/// and moves on to the next hook; it never reaches the embedding process.
#[derive(Error, Debug)]
pub enum HookError {
    /// The command could not be launched
    #[error("failed to spawn {hook} {stage} command: {source}")]
    Spawn {
        hook: String,
        stage: HookStage,
        #[source]
        source: io::Error,
    },

    /// The command ran but did not exit successfully
    #[error("{hook} {stage} command {}", describe_status(*.code))]
    ExitStatus {
        hook: String,
        stage: HookStage,
        /// `None` when the process was terminated by a signal
        code: Option<i32>,
    },
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl HookError {
    /// Create a spawn error
    pub fn spawn(hook: impl Into<String>, stage: HookStage, source: io::Error) -> Self {
        Self::Spawn {
            hook: hook.into(),
            stage,
            source,
        }
    }

    /// Create an exit status error
    pub fn exit_status(hook: impl Into<String>, stage: HookStage, code: Option<i32>) -> Self {
        Self::ExitStatus {
            hook: hook.into(),
            stage,
            code,
        }
    }

    /// Name of the hook that failed
    pub fn hook(&self) -> &str {
        match self {
            Self::Spawn { hook, .. } | Self::ExitStatus { hook, .. } => hook,
        }
    }

    /// Stage during which the hook failed
    pub fn stage(&self) -> HookStage {
        match self {
            Self::Spawn { stage, .. } | Self::ExitStatus { stage, .. } => *stage,
        }
    }
}
