//! Hook variants
//!
//! A hook is a pair of independent actions, one for container init and one
//! for container exit. The set of hook kinds is closed: iproute, NAT and
//! user-supplied commands.

use tracing::debug;

use super::command::CommandSpec;
use super::runner::ActionRunner;
use crate::config::env::{EnvSnapshot, ROUTES_EXIT, ROUTES_INIT};
use crate::error::{HookResult, HookStage};

/// One side (init or exit) of a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookAction {
    label: String,
    env_key: Option<String>,
    command: Option<CommandSpec>,
}

impl HookAction {
    /// Action whose command is the value of `env_key`, if set
    pub fn from_env(label: impl Into<String>, env_key: impl Into<String>, env: &EnvSnapshot) -> Self {
        let env_key = env_key.into();
        let command = env.get(&env_key).map(CommandSpec::shell);
        Self {
            label: label.into(),
            env_key: Some(env_key),
            command,
        }
    }

    /// Action with a built-in command
    pub fn fixed(label: impl Into<String>, command: CommandSpec) -> Self {
        Self {
            label: label.into(),
            env_key: None,
            command: Some(command),
        }
    }

    /// Human readable label, e.g. `pre init`
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Variable the command was read from
    pub fn env_key(&self) -> Option<&str> {
        self.env_key.as_deref()
    }

    /// Command to run, `None` when the action is a no-op
    pub fn command(&self) -> Option<&CommandSpec> {
        self.command.as_ref()
    }

    /// Whether running this action invokes anything
    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }

    /// Summary line, `None` for a no-op action
    pub fn describe(&self) -> Option<String> {
        let command = self.command.as_ref()?;
        Some(match &self.env_key {
            Some(key) => format!("{}: {} (from {})", self.label, command, key),
            None => format!("{}: {}", self.label, command),
        })
    }

    async fn run<R>(&self, hook: &str, stage: HookStage, runner: &R) -> HookResult<()>
    where
        R: ActionRunner + ?Sized,
    {
        match &self.command {
            Some(command) => runner.run(hook, stage, command).await,
            None => {
                debug!(hook, %stage, "{} not configured, skipping", self.label);
                Ok(())
            }
        }
    }
}

/// Installs routes at init and removes them at exit.
/// Commands come from `ROUTES_INIT` and `ROUTES_EXIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRouteHook {
    init: HookAction,
    exit: HookAction,
}

impl IpRouteHook {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            init: HookAction::from_env("iproute init", ROUTES_INIT, env),
            exit: HookAction::from_env("iproute exit", ROUTES_EXIT, env),
        }
    }
}

/// IPv4 masquerading on the nat table. Not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nat4Hook {
    init: HookAction,
    exit: HookAction,
}

impl Nat4Hook {
    pub fn new() -> Self {
        Self {
            init: HookAction::fixed("nat4 init", masquerade_rule("-A")),
            exit: HookAction::fixed("nat4 exit", masquerade_rule("-D")),
        }
    }
}

impl Default for Nat4Hook {
    fn default() -> Self {
        Self::new()
    }
}

fn masquerade_rule(op: &str) -> CommandSpec {
    CommandSpec::exec("iptables", ["-t", "nat", op, "POSTROUTING", "-j", "MASQUERADE"])
}

/// Hook driven entirely by user-supplied commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHook {
    init: HookAction,
    exit: HookAction,
}

impl UserHook {
    /// Hook named `name` reading `<PREFIX>_INIT_HOOK` and `<PREFIX>_EXIT_HOOK`
    pub fn new(name: &str, prefix: &str, env: &EnvSnapshot) -> Self {
        Self::with_keys(
            format!("{} init", name),
            format!("{}_INIT_HOOK", prefix),
            format!("{} exit", name),
            format!("{}_EXIT_HOOK", prefix),
            env,
        )
    }

    /// Hook with explicit labels and variables for each side
    pub fn with_keys(
        init_label: impl Into<String>,
        init_key: impl Into<String>,
        exit_label: impl Into<String>,
        exit_key: impl Into<String>,
        env: &EnvSnapshot,
    ) -> Self {
        Self {
            init: HookAction::from_env(init_label, init_key, env),
            exit: HookAction::from_env(exit_label, exit_key, env),
        }
    }
}

/// A registered hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hook {
    IpRoute(IpRouteHook),
    Nat4(Nat4Hook),
    User(UserHook),
}

impl Hook {
    fn actions(&self) -> (&HookAction, &HookAction) {
        match self {
            Self::IpRoute(h) => (&h.init, &h.exit),
            Self::Nat4(h) => (&h.init, &h.exit),
            Self::User(h) => (&h.init, &h.exit),
        }
    }

    /// Init side of the hook
    pub fn init_action(&self) -> &HookAction {
        self.actions().0
    }

    /// Exit side of the hook
    pub fn exit_action(&self) -> &HookAction {
        self.actions().1
    }

    /// Run the init action, or nothing if it is not configured
    pub async fn run_init<R>(&self, name: &str, runner: &R) -> HookResult<()>
    where
        R: ActionRunner + ?Sized,
    {
        self.init_action().run(name, HookStage::Init, runner).await
    }

    /// Run the exit action, or nothing if it is not configured
    pub async fn run_exit<R>(&self, name: &str, runner: &R) -> HookResult<()>
    where
        R: ActionRunner + ?Sized,
    {
        self.exit_action().run(name, HookStage::Exit, runner).await
    }

    /// One line per configured action
    pub fn describe(&self) -> Vec<String> {
        let (init, exit) = self.actions();
        init.describe().into_iter().chain(exit.describe()).collect()
    }
}

impl From<IpRouteHook> for Hook {
    fn from(hook: IpRouteHook) -> Self {
        Self::IpRoute(hook)
    }
}

impl From<Nat4Hook> for Hook {
    fn from(hook: Nat4Hook) -> Self {
        Self::Nat4(hook)
    }
}

impl From<UserHook> for Hook {
    fn from(hook: UserHook) -> Self {
        Self::User(hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::runner::MockActionRunner;

    #[test]
    fn test_user_hook_keys_and_labels() {
        let env = EnvSnapshot::from_pairs([("PRE_INIT_HOOK", "/etc/pre-up.sh")]);
        let hook = UserHook::new("pre", "PRE", &env);

        assert_eq!(hook.init.label(), "pre init");
        assert_eq!(hook.init.env_key(), Some("PRE_INIT_HOOK"));
        assert_eq!(hook.init.command(), Some(&CommandSpec::shell("/etc/pre-up.sh")));
        assert_eq!(hook.exit.label(), "pre exit");
        assert_eq!(hook.exit.env_key(), Some("PRE_EXIT_HOOK"));
        assert!(!hook.exit.is_configured());
    }

    #[test]
    fn test_empty_value_counts_as_configured() {
        let env = EnvSnapshot::from_pairs([("ROUTES_EXIT", "")]);
        let hook = IpRouteHook::from_env(&env);
        assert!(!hook.init.is_configured());
        assert!(hook.exit.is_configured());
    }

    #[test]
    fn test_describe_lines() {
        let hook = Hook::from(UserHook::new("post", "POST", &EnvSnapshot::default()));
        assert!(hook.describe().is_empty());

        let env = EnvSnapshot::from_pairs([("ROUTES_INIT", "/bin/true")]);
        let hook = Hook::from(IpRouteHook::from_env(&env));
        assert_eq!(hook.describe(), vec!["iproute init: /bin/true (from ROUTES_INIT)"]);

        let hook = Hook::from(Nat4Hook::new());
        assert_eq!(
            hook.describe(),
            vec![
                "nat4 init: iptables -t nat -A POSTROUTING -j MASQUERADE",
                "nat4 exit: iptables -t nat -D POSTROUTING -j MASQUERADE",
            ]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_action_does_not_invoke_runner() {
        let mut runner = MockActionRunner::new();
        runner.expect_run().never();

        let hook = Hook::from(UserHook::new("pre", "PRE", &EnvSnapshot::default()));
        assert!(hook.run_init("pre", &runner).await.is_ok());
        assert!(hook.run_exit("pre", &runner).await.is_ok());
    }

    #[tokio::test]
    async fn test_configured_action_invokes_runner_once() {
        let mut runner = MockActionRunner::new();
        runner
            .expect_run()
            .withf(|hook, stage, command| {
                hook == "post"
                    && *stage == HookStage::Init
                    && *command == CommandSpec::shell("/opt/check.sh")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let env = EnvSnapshot::from_pairs([("POST_INIT_HOOK", "/opt/check.sh")]);
        let hook = Hook::from(UserHook::new("post", "POST", &env));
        assert!(hook.run_init("post", &runner).await.is_ok());
        // exit side is unset
        assert!(hook.run_exit("post", &runner).await.is_ok());
    }

    #[tokio::test]
    async fn test_runner_error_is_returned() {
        let mut runner = MockActionRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|hook, stage, _| Err(crate::error::HookError::exit_status(hook, stage, Some(1))));

        let hook = Hook::from(Nat4Hook::new());
        let err = hook.run_exit("nat4", &runner).await.unwrap_err();
        assert_eq!(err.hook(), "nat4");
        assert_eq!(err.stage(), HookStage::Exit);
    }
}
