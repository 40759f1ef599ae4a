//! Command specification for hook actions

use std::fmt;

/// An external command a hook action runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Command line or script path handed to `sh -c`
    Shell(String),
    /// Program executed directly with its arguments
    Exec { program: String, args: Vec<String> },
}

impl CommandSpec {
    /// Create a shell command
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell(command.into())
    }

    /// Create a direct invocation
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(command) => write!(f, "{}", command),
            Self::Exec { program, args } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CommandSpec::shell("/usr/local/bin/up.sh").to_string(), "/usr/local/bin/up.sh");
        assert_eq!(
            CommandSpec::exec("iptables", ["-t", "nat", "-L"]).to_string(),
            "iptables -t nat -L"
        );
        assert_eq!(CommandSpec::exec("true", Vec::<String>::new()).to_string(), "true");
    }
}
