use shellstate_common::StateTree;

/// Events exchanged between the hydration controller and the store.
#[derive(Debug, Clone, PartialEq)]
pub enum HydrationAction {
    /// Reserved for explicit persist-on-demand; nothing consumes it yet.
    PersistTriggered,
    /// Emitted once per process, at boot.
    HydrationTriggered,
    /// Emitted once per lazily mounted feature bundle.
    LazyHydrationTriggered,
    /// The reconciled tree to install in one step.
    HydrationSuccessful { state: StateTree },
    /// Storage was empty, unreadable, or could not be reconciled.
    HydrationFailed,
    /// Reserved for an explicit full reset; nothing consumes it yet.
    ResetState,
}

impl HydrationAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PersistTriggered => "[Hydration Manager] Persist to Storage triggered",
            Self::HydrationTriggered => "[Hydration Manager] Hydration triggered",
            Self::LazyHydrationTriggered => "[Hydration Manager] Lazy Hydration triggered",
            Self::HydrationSuccessful { .. } => "[Hydration Manager] Hydration successful",
            Self::HydrationFailed => "[Hydration Manager] Hydration failed",
            Self::ResetState => "[Hydration Manager] Reset State",
        }
    }

    /// Whether this is a hydration outcome (success or failure).
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            Self::HydrationSuccessful { .. } | Self::HydrationFailed
        )
    }
}
