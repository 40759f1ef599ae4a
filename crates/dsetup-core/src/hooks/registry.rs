//! Hook registry
//!
//! Maps a short key (`pre`, `iproute`, ...) to its hook. Iteration order
//! carries no meaning: execution order is fixed by the lifecycle controller.

use std::collections::HashMap;

use super::types::{Hook, IpRouteHook, Nat4Hook, UserHook};
use crate::config::EnvSnapshot;

pub const PRE: &str = "pre";
pub const POST: &str = "post";
pub const IPROUTE: &str = "iproute";
pub const NAT4: &str = "nat4";

/// Keyed collection of hooks
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Hook>,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in hooks configured from `env`
    pub fn builtin(env: &EnvSnapshot) -> Self {
        let mut registry = Self::new();
        registry.register(IPROUTE, IpRouteHook::from_env(env));
        registry.register(NAT4, Nat4Hook::new());
        registry.register(PRE, UserHook::new(PRE, "PRE", env));
        registry.register(POST, UserHook::new(POST, "POST", env));
        registry
    }

    /// Register a hook, replacing any hook already under `key`
    pub fn register(&mut self, key: impl Into<String>, hook: impl Into<Hook>) {
        self.hooks.insert(key.into(), hook.into());
    }

    /// Look up a hook by key
    pub fn lookup(&self, key: &str) -> Option<&Hook> {
        self.hooks.get(key)
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hook is registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hooks sorted by key
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &Hook)> {
        let mut entries: Vec<_> = self.hooks.iter().map(|(k, h)| (k.as_str(), h)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
