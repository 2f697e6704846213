use crate::action::HydrationAction;
use crate::config::HydrationConfig;
use shellstate_common::StateTree;
use shellstate_kernel::{Action, Effect, EffectContext, Embeds};
use shellstate_persist::{
    KeyValueStorage, PersistenceGateway, Snapshot, StoredRecord, merge_over, parse_snapshot,
    reattach_router, strip,
};

/// The most recently validated snapshot of this process.
///
/// Starts empty. Only the boot hydrate handler writes it, each time a stored
/// record parses; the lazy hydrate and persist handlers read it. It is never
/// cleared, so it always holds the last well-formed snapshot seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationCache {
    snapshot: Snapshot,
}

impl HydrationCache {
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    fn store(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }
}

/// Drives hydration from the action stream: boot trigger, boot hydrate, lazy
/// hydrate and continuous persist.
///
/// Each handler is a plain method so it can be exercised without a store;
/// the [`Effect`] impl only routes notifications to them.
#[derive(Debug)]
pub struct HydrationController<S> {
    config: HydrationConfig,
    gateway: PersistenceGateway<S>,
    cache: HydrationCache,
    persisting: bool,
    /// Last state value handled by persist, for duplicate suppression.
    last_persisted: Option<StateTree>,
}

impl<S: KeyValueStorage> HydrationController<S> {
    pub fn new(config: HydrationConfig, storage: S) -> Self {
        Self {
            config,
            gateway: PersistenceGateway::new(storage),
            cache: HydrationCache::default(),
            persisting: false,
            last_persisted: None,
        }
    }

    /// Boot trigger, emitted once when the controller starts.
    pub fn init(&self) -> HydrationAction {
        HydrationAction::HydrationTriggered
    }

    /// Boot path: read the stored record and reconcile it with `current`.
    pub fn hydrate(&mut self, current: &StateTree) -> HydrationAction {
        let key = &self.config.hydration_key;
        let router_key = &self.config.router_state_key;

        let record = match self.gateway.read(key) {
            StoredRecord::Text(record) => record,
            StoredRecord::Absent => {
                tracing::info!(key = %key, "no persisted state, starting fresh");
                return HydrationAction::HydrationFailed;
            }
            StoredRecord::Corrupt => {
                tracing::warn!(key = %key, "discarding corrupt persisted state");
                self.gateway.remove(key);
                return HydrationAction::HydrationFailed;
            }
        };

        let snapshot = match parse_snapshot(&record, router_key) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %key, "discarding unreadable persisted state: {e}");
                self.gateway.remove(key);
                return HydrationAction::HydrationFailed;
            }
        };
        self.cache.store(snapshot);

        match reattach_router(self.cache.snapshot(), current, router_key) {
            Ok(state) => {
                tracing::info!(key = %key, slots = state.len(), "state hydrated");
                HydrationAction::HydrationSuccessful { state }
            }
            Err(e) => {
                tracing::warn!(key = %key, "cannot reconcile persisted state: {e}");
                self.gateway.remove(key);
                HydrationAction::HydrationFailed
            }
        }
    }

    /// Lazy path: re-apply the cached snapshot over `current` without
    /// touching storage.
    ///
    /// Cached slots win over live ones, which is what overwrites a freshly
    /// mounted feature's initial state. With an empty cache the result is
    /// `current` itself.
    pub fn lazy_hydrate(&mut self, current: &StateTree) -> HydrationAction {
        let router_key = &self.config.router_state_key;
        let layered = strip(current, router_key).overlay(self.cache.snapshot());

        match reattach_router(&layered, current, router_key) {
            Ok(state) => {
                tracing::info!(slots = state.len(), "lazily mounted state hydrated");
                HydrationAction::HydrationSuccessful { state }
            }
            Err(e) => {
                tracing::warn!("cannot reconcile cached state: {e}");
                self.gateway.remove(&self.config.hydration_key);
                HydrationAction::HydrationFailed
            }
        }
    }

    /// Start persisting on the first hydration outcome, beginning with the
    /// state current at that moment.
    pub fn arm_persist(&mut self, current: &StateTree) {
        if !self.persisting {
            tracing::debug!("persistence armed");
            self.persisting = true;
        }
        self.persist(current);
    }

    /// Write `state` to storage unless persistence is not armed yet or the
    /// value equals the last one handled.
    ///
    /// The cache is merged underneath so slots of features not mounted in
    /// this session are kept in the record.
    pub fn persist(&mut self, state: &StateTree) {
        if !self.persisting || self.last_persisted.as_ref() == Some(state) {
            return;
        }
        let merged = merge_over(self.cache.snapshot().as_tree(), state);
        let snapshot = strip(&merged, &self.config.router_state_key);
        self.gateway.write(&self.config.hydration_key, &snapshot);
        self.last_persisted = Some(state.clone());
    }

    pub fn config(&self) -> &HydrationConfig {
        &self.config
    }

    pub fn cache(&self) -> &HydrationCache {
        &self.cache
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn is_persisting(&self) -> bool {
        self.persisting
    }
}

impl<A, S> Effect<A> for HydrationController<S>
where
    A: Action + Embeds<HydrationAction>,
    S: KeyValueStorage + 'static,
{
    fn name(&self) -> &'static str {
        "hydration"
    }

    fn on_start(&mut self, ctx: &mut EffectContext<'_, A>) {
        ctx.dispatch(self.init());
    }

    fn on_action(&mut self, action: &A, ctx: &mut EffectContext<'_, A>) {
        let Some(action) = action.embedded() else {
            return;
        };
        match action {
            HydrationAction::HydrationTriggered => {
                let outcome = self.hydrate(ctx.state());
                ctx.dispatch(outcome);
            }
            HydrationAction::LazyHydrationTriggered => {
                let outcome = self.lazy_hydrate(ctx.state());
                ctx.dispatch(outcome);
            }
            HydrationAction::HydrationSuccessful { .. } | HydrationAction::HydrationFailed => {
                self.arm_persist(ctx.state());
            }
            HydrationAction::PersistTriggered | HydrationAction::ResetState => {
                tracing::debug!(kind = action.kind(), "reserved hydration action ignored");
            }
        }
    }

    fn on_state_change(&mut self, ctx: &mut EffectContext<'_, A>) {
        self.persist(ctx.state());
    }
}
