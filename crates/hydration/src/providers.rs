use crate::action::HydrationAction;
use crate::config::HydrationConfig;
use crate::controller::HydrationController;
use crate::meta_reducer::HydrationMetaReducer;
use shellstate_kernel::{Action, Embeds, Providers};
use shellstate_persist::KeyValueStorage;

/// Boot-time registration: the hydration meta-reducer plus the controller
/// effect, which triggers hydration as soon as the store starts it.
pub fn provide_state_hydration_feature<A, S>(config: HydrationConfig, storage: S) -> Providers<A>
where
    A: Action + Embeds<HydrationAction>,
    S: KeyValueStorage + 'static,
{
    Providers::new()
        .meta_reducer(HydrationMetaReducer)
        .effect(HydrationController::new(config, storage))
}

/// Feature-load registration: re-applies the boot snapshot once the bundle
/// it is merged into has been mounted.
pub fn provide_lazy_state_hydration<A>() -> Providers<A>
where
    A: Action + Embeds<HydrationAction>,
{
    Providers::new().initializer(HydrationAction::LazyHydrationTriggered)
}
