//! Hooks invoked before claim resolution.
//!
//! Listeners are handed to the module at construction time and shared by
//! every tenant store it creates.

/// Outcome of a listener callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListenerDecision {
    /// Let resolution proceed (default).
    #[default]
    Continue,
    /// Short-circuit: the store returns an empty result without further work.
    Stop,
}

impl ListenerDecision {
    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// Listener consulted before `get_all_claim_uris` and `get_attribute_name`.
///
/// Both callbacks default to [`ListenerDecision::Continue`], so implementors
/// only override what they care about.
pub trait ResolutionListener: Send + Sync {
    /// Called before listing all local claim URIs.
    fn before_get_all_claim_uris(&self) -> ListenerDecision {
        ListenerDecision::Continue
    }

    /// Called before resolving the attribute for `claim_uri` in `domain_name`.
    fn before_get_attribute_name(&self, _domain_name: &str, _claim_uri: &str) -> ListenerDecision {
        ListenerDecision::Continue
    }
}
