use crate::action::Action;
use serde::de::DeserializeOwned;
use shellstate_common::StateTree;

/// What an effect can see and do while handling one notification.
///
/// Dispatched actions are queued; the store processes them after the
/// current action has been delivered to every effect.
pub struct EffectContext<'a, A> {
    state: &'a StateTree,
    queued: &'a mut Vec<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    pub(crate) fn new(state: &'a StateTree, queued: &'a mut Vec<A>) -> Self {
        Self { state, queued }
    }

    /// The state tree at the instant of this notification.
    pub fn state(&self) -> &'a StateTree {
        self.state
    }

    /// Decode one slot of the current state. `None` when absent or malformed.
    pub fn select<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.state.get(key)?;
        T::deserialize(value).ok()
    }

    /// Queue an action for dispatch.
    pub fn dispatch(&mut self, action: impl Into<A>) {
        self.queued.push(action.into());
    }
}

/// A reaction handler driven by the store's action and state streams.
///
/// Handlers run to completion; there is no cancellation.
pub trait Effect<A: Action>: 'static {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Called once when the effect is registered.
    fn on_start(&mut self, ctx: &mut EffectContext<'_, A>) {
        let _ = ctx;
    }

    /// Called for every processed action, after reduction.
    fn on_action(&mut self, action: &A, ctx: &mut EffectContext<'_, A>) {
        let _ = (action, ctx);
    }

    /// Called whenever an action changed the state tree by value.
    fn on_state_change(&mut self, ctx: &mut EffectContext<'_, A>) {
        let _ = ctx;
    }
}
