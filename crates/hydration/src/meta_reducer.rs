use crate::action::HydrationAction;
use shellstate_common::StateTree;
use shellstate_kernel::{Embeds, MetaReducer, ReduceFn};

/// Installs a hydration-successful tree verbatim and delegates everything
/// else to the wrapped reducer.
///
/// For that one action the feature reducers are skipped, so hydration is
/// invisible to business logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HydrationMetaReducer;

impl<A> MetaReducer<A> for HydrationMetaReducer
where
    A: Embeds<HydrationAction>,
{
    fn wrap(&self, state: StateTree, action: &A, inner: &ReduceFn<'_, A>) -> StateTree {
        match action.embedded() {
            Some(HydrationAction::HydrationSuccessful { state: hydrated }) => hydrated.clone(),
            _ => inner(state, action),
        }
    }
}
