//! Lifecycle phase definitions

use std::fmt;

/// Where the controller is in the container lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Constructed, init hooks not yet completed
    Initializing,
    /// Init sequence completed, waiting for exit
    Running,
    /// Exit sequence started
    Terminating,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Running => write!(f, "running"),
            Self::Terminating => write!(f, "terminating"),
        }
    }
}
