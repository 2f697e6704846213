use crate::action::Action;
use crate::effect::{Effect, EffectContext};
use crate::error::StoreError;
use crate::feature::FeatureSlot;
use crate::providers::Providers;
use crate::reducer::MetaReducer;
use serde::de::DeserializeOwned;
use shellstate_common::StateTree;
use std::collections::{BTreeSet, VecDeque};

/// The state container.
///
/// Owns the state tree, the reducer chain and the effects. Every mutation is
/// an action; actions are processed one at a time in dispatch order, and
/// actions dispatched by effects join the back of the queue.
///
/// Slots with no registered feature are carried through reduction untouched,
/// so state hydrated for features that are not mounted yet survives.
pub struct Store<A: Action> {
    state: StateTree,
    features: Vec<FeatureSlot<A>>,
    meta_reducers: Vec<Box<dyn MetaReducer<A>>>,
    effects: Vec<Box<dyn Effect<A>>>,
    queue: VecDeque<A>,
    /// Append-only log of processed actions.
    action_log: Vec<A>,
}

impl<A: Action> Store<A> {
    /// Build the store from the boot-time provider bundle.
    ///
    /// Meta-reducers are fixed here. Features get their initial state, effects
    /// are started, then initializer actions are dispatched and the queue is
    /// drained before returning.
    pub fn boot(mut providers: Providers<A>) -> Result<Self, StoreError> {
        let mut store = Self {
            state: StateTree::new(),
            features: Vec::new(),
            meta_reducers: std::mem::take(&mut providers.meta_reducers),
            effects: Vec::new(),
            queue: VecDeque::new(),
            action_log: Vec::new(),
        };
        store.register(providers)?;
        Ok(store)
    }

    /// Register a lazily loaded provider bundle.
    ///
    /// Each new feature's slot is overwritten with its initial state.
    pub fn mount(&mut self, providers: Providers<A>) -> Result<(), StoreError> {
        if !providers.meta_reducers.is_empty() {
            return Err(StoreError::LateMetaReducer {
                count: providers.meta_reducers.len(),
            });
        }
        self.register(providers)
    }

    /// Dispatch an action and process everything it causes.
    pub fn dispatch(&mut self, action: impl Into<A>) {
        self.queue.push_back(action.into());
        self.drain();
    }

    /// The current state tree.
    pub fn state(&self) -> &StateTree {
        &self.state
    }

    /// Decode one slot of the state tree.
    pub fn select<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(value) = self.state.get(key) else {
            return Ok(None);
        };
        T::deserialize(value)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_owned(),
                source,
            })
    }

    /// Whether a feature is registered under `key`.
    pub fn has_feature(&self, key: &str) -> bool {
        self.features.iter().any(|f| f.key() == key)
    }

    /// Keys of registered features, in registration order.
    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.key())
    }

    /// Number of registered effects.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Read-only access to the processed-action log.
    pub fn actions(&self) -> &[A] {
        &self.action_log
    }

    /// Drain and return the processed-action log.
    pub fn drain_actions(&mut self) -> Vec<A> {
        std::mem::take(&mut self.action_log)
    }

    fn register(&mut self, providers: Providers<A>) -> Result<(), StoreError> {
        let Providers {
            features,
            effects,
            initializers,
            ..
        } = providers;

        let mut incoming = BTreeSet::new();
        for slot in &features {
            if self.has_feature(slot.key()) || !incoming.insert(slot.key()) {
                return Err(StoreError::DuplicateFeature(slot.key().to_owned()));
            }
        }
        let mut initial = Vec::with_capacity(features.len());
        for slot in &features {
            initial.push(slot.initial()?);
        }
        for (slot, value) in features.into_iter().zip(initial) {
            tracing::debug!(feature = slot.key(), "feature registered");
            self.state.insert(slot.key().to_owned(), value);
            self.features.push(slot);
        }

        let mut queued = Vec::new();
        for mut effect in effects {
            tracing::debug!(effect = effect.name(), "effect started");
            let mut ctx = EffectContext::new(&self.state, &mut queued);
            effect.on_start(&mut ctx);
            self.effects.push(effect);
        }
        self.queue.extend(queued);
        self.queue.extend(initializers);
        self.drain();
        Ok(())
    }

    fn drain(&mut self) {
        let _span = tracing::info_span!("dispatch").entered();
        while let Some(action) = self.queue.pop_front() {
            self.process(action);
        }
    }

    fn process(&mut self, action: A) {
        tracing::trace!(kind = action.kind(), "reducing action");
        let previous = self.state.clone();
        let state = std::mem::take(&mut self.state);
        let next = self.reduce(state, &action);
        let changed = next != previous;
        self.state = next;

        let mut queued = Vec::new();
        if changed {
            for effect in &mut self.effects {
                let mut ctx = EffectContext::new(&self.state, &mut queued);
                effect.on_state_change(&mut ctx);
            }
        }
        for effect in &mut self.effects {
            let mut ctx = EffectContext::new(&self.state, &mut queued);
            effect.on_action(&action, &mut ctx);
        }
        self.queue.extend(queued);
        self.action_log.push(action);
    }

    fn reduce(&self, state: StateTree, action: &A) -> StateTree {
        self.reduce_from(0, state, action)
    }

    fn reduce_from(&self, depth: usize, state: StateTree, action: &A) -> StateTree {
        match self.meta_reducers.get(depth) {
            Some(meta) => meta.wrap(state, action, &|state: StateTree, action: &A| {
                self.reduce_from(depth + 1, state, action)
            }),
            None => self.reduce_features(state, action),
        }
    }

    fn reduce_features(&self, mut state: StateTree, action: &A) -> StateTree {
        for slot in &self.features {
            let next = slot.reduce(state.get(slot.key()), action);
            state.insert(slot.key().to_owned(), next);
        }
        state
    }
}
