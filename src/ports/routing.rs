//! Backend routing flag.
//!
//! The gateway decides per call whether new creates go to the remote
//! table-store or the local database. The flag is deliberately dynamic
//! (re-read on every call, never cached), so it is modeled as an
//! injected accessor rather than ambient global state.

/// Accessor for the per-call backend toggle.
pub trait RoutingFlag: Send + Sync {
    /// True routes the create to the remote store.
    fn use_remote(&self) -> bool;
}

/// Environment-backed routing flag.
///
/// Reads the variable on every call. Truthy values are `1`, `true`, and
/// `yes`, case-insensitively; anything else (including an unset
/// variable) routes locally.
#[derive(Debug, Clone)]
pub struct EnvRoutingFlag {
    var: &'static str,
}

impl EnvRoutingFlag {
    /// The variable consulted by [`EnvRoutingFlag::new`].
    pub const DEFAULT_VAR: &'static str = "USE_SUPABASE_REST";

    /// Flag backed by `USE_SUPABASE_REST`.
    pub fn new() -> Self {
        Self {
            var: Self::DEFAULT_VAR,
        }
    }

    /// Flag backed by a custom variable name.
    pub fn with_var(var: &'static str) -> Self {
        Self { var }
    }
}

impl Default for EnvRoutingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingFlag for EnvRoutingFlag {
    fn use_remote(&self) -> bool {
        std::env::var(self.var)
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}

/// Fixed routing flag for tests and single-backend deployments.
#[derive(Debug, Clone, Copy)]
pub struct StaticRoutingFlag(pub bool);

impl RoutingFlag for StaticRoutingFlag {
    fn use_remote(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_flag_returns_its_value() {
        assert!(StaticRoutingFlag(true).use_remote());
        assert!(!StaticRoutingFlag(false).use_remote());
    }

    #[test]
    fn env_flag_parses_truthy_values() {
        let flag = EnvRoutingFlag::with_var("CLAVISNOVA_TEST_ROUTING_TRUTHY");
        for value in ["1", "true", "TRUE", "yes", "Yes"] {
            std::env::set_var("CLAVISNOVA_TEST_ROUTING_TRUTHY", value);
            assert!(flag.use_remote(), "{value} should route remotely");
        }
        std::env::remove_var("CLAVISNOVA_TEST_ROUTING_TRUTHY");
    }

    #[test]
    fn env_flag_defaults_to_local() {
        let flag = EnvRoutingFlag::with_var("CLAVISNOVA_TEST_ROUTING_UNSET");
        std::env::remove_var("CLAVISNOVA_TEST_ROUTING_UNSET");
        assert!(!flag.use_remote());

        std::env::set_var("CLAVISNOVA_TEST_ROUTING_UNSET", "false");
        assert!(!flag.use_remote());
        std::env::set_var("CLAVISNOVA_TEST_ROUTING_UNSET", "anything-else");
        assert!(!flag.use_remote());
        std::env::remove_var("CLAVISNOVA_TEST_ROUTING_UNSET");
    }

    #[test]
    fn env_flag_is_reread_each_call() {
        let flag = EnvRoutingFlag::with_var("CLAVISNOVA_TEST_ROUTING_DYNAMIC");
        std::env::set_var("CLAVISNOVA_TEST_ROUTING_DYNAMIC", "true");
        assert!(flag.use_remote());
        std::env::set_var("CLAVISNOVA_TEST_ROUTING_DYNAMIC", "false");
        assert!(!flag.use_remote());
        std::env::remove_var("CLAVISNOVA_TEST_ROUTING_DYNAMIC");
    }
}
