use shellstate_common::StateTree;

/// The root reduction function as seen by a meta-reducer.
pub type ReduceFn<'a, A> = dyn Fn(StateTree, &A) -> StateTree + 'a;

/// Decorator over the root reduction function.
///
/// Meta-reducers are registered at boot and composed once: the first one
/// registered is the outermost. `inner` is the rest of the chain, ending in
/// the per-feature reducers; a meta-reducer that does not call it bypasses
/// ordinary reduction for that action entirely.
pub trait MetaReducer<A>: 'static {
    fn wrap(&self, state: StateTree, action: &A, inner: &ReduceFn<'_, A>) -> StateTree;
}
