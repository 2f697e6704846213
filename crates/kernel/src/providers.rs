use crate::action::Action;
use crate::effect::Effect;
use crate::feature::{Feature, FeatureSlot};
use crate::reducer::MetaReducer;

/// A bundle of registrations handed to the store at boot or on a lazy mount.
///
/// Bundles are opaque to the host: it builds them with the functions a
/// feature crate exports and passes them on to [`Store::boot`] or
/// [`Store::mount`].
///
/// [`Store::boot`]: crate::Store::boot
/// [`Store::mount`]: crate::Store::mount
pub struct Providers<A: Action> {
    pub(crate) features: Vec<FeatureSlot<A>>,
    pub(crate) meta_reducers: Vec<Box<dyn MetaReducer<A>>>,
    pub(crate) effects: Vec<Box<dyn Effect<A>>>,
    pub(crate) initializers: Vec<A>,
}

impl<A: Action> Providers<A> {
    /// An empty bundle.
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
            meta_reducers: Vec::new(),
            effects: Vec::new(),
            initializers: Vec::new(),
        }
    }

    /// Register a feature slice.
    pub fn feature(mut self, feature: impl Feature<A>) -> Self {
        self.features.push(FeatureSlot::new(feature));
        self
    }

    /// Register a meta-reducer. Only accepted at boot.
    pub fn meta_reducer(mut self, meta: impl MetaReducer<A>) -> Self {
        self.meta_reducers.push(Box::new(meta));
        self
    }

    /// Register an effect.
    pub fn effect(mut self, effect: impl Effect<A>) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Dispatch an action once this bundle has been registered.
    pub fn initializer(mut self, action: impl Into<A>) -> Self {
        self.initializers.push(action.into());
        self
    }

    /// Append all registrations of `other`, keeping their order.
    pub fn merge(mut self, other: Providers<A>) -> Self {
        self.features.extend(other.features);
        self.meta_reducers.extend(other.meta_reducers);
        self.effects.extend(other.effects);
        self.initializers.extend(other.initializers);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
            && self.meta_reducers.is_empty()
            && self.effects.is_empty()
            && self.initializers.is_empty()
    }
}

impl<A: Action> Default for Providers<A> {
    fn default() -> Self {
        Self::new()
    }
}
