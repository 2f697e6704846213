use serde::{Deserialize, Serialize};
use shellstate_kernel::{Embeds, Feature};

/// Router slice actions.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterAction {
    Navigated { url: String },
}

impl RouterAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigated { .. } => "[Router] Navigated",
        }
    }
}

/// Session-local route location. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    pub url: String,
    /// Number of navigations in this session.
    pub navigation_id: u64,
}

/// The router slice, registered under the configured router key.
#[derive(Debug, Clone)]
pub struct RouterFeature {
    key: String,
    initial_url: String,
}

impl RouterFeature {
    pub fn new(key: impl Into<String>, initial_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            initial_url: initial_url.into(),
        }
    }
}

impl<A> Feature<A> for RouterFeature
where
    A: Embeds<RouterAction>,
{
    type State = RouterState;

    fn key(&self) -> &str {
        &self.key
    }

    fn reduce(&self, state: RouterState, action: &A) -> RouterState {
        match action.embedded() {
            Some(RouterAction::Navigated { url }) => RouterState {
                url: url.clone(),
                navigation_id: state.navigation_id + 1,
            },
            None => state,
        }
    }

    fn initial_state(&self) -> RouterState {
        RouterState {
            url: self.initial_url.clone(),
            navigation_id: 0,
        }
    }
}
