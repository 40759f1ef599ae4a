//! Environment variable snapshot
//!
//! Hooks are built from the environment as it was when the controller was
//! constructed. Later changes to the process environment have no effect.

use std::collections::HashMap;
use std::env;

/// Enables one-shot mode when set to exactly `true`
pub const ONESHOT: &str = "ONESHOT";
/// Command run by the iproute hook at init
pub const ROUTES_INIT: &str = "ROUTES_INIT";
/// Command run by the iproute hook at exit
pub const ROUTES_EXIT: &str = "ROUTES_EXIT";

/// Immutable copy of the environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    pub fn from_env() -> Self {
        // vars_os tolerates non UTF-8 entries; those are dropped
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a variable, `None` when unset. An empty value counts as set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether the variable is present at all
    pub fn is_set(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// One-shot is enabled only by the exact string `true`
    pub fn oneshot(&self) -> bool {
        self.get(ONESHOT) == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_is_set() {
        let env = EnvSnapshot::from_pairs([("ROUTES_INIT", "/bin/true"), ("EMPTY", "")]);
        assert_eq!(env.get("ROUTES_INIT"), Some("/bin/true"));
        assert_eq!(env.get("ROUTES_EXIT"), None);
        assert!(env.is_set("EMPTY"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert!(!env.is_set("MISSING"));
    }

    #[test]
    fn test_oneshot_exact_match() {
        assert!(EnvSnapshot::from_pairs([(ONESHOT, "true")]).oneshot());

        for value in ["TRUE", "True", "1", "false", "yes", "", " true"] {
            assert!(
                !EnvSnapshot::from_pairs([(ONESHOT, value)]).oneshot(),
                "ONESHOT={:?} must not enable one-shot",
                value
            );
        }

        assert!(!EnvSnapshot::default().oneshot());
    }

    #[test]
    fn test_from_env_sees_process_environment() {
        // PATH is present in every test environment we run in
        let env = EnvSnapshot::from_env();
        assert_eq!(env.get("PATH").map(str::to_string), std::env::var("PATH").ok());
    }
}
