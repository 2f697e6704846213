use serde_json::{Map, Value};

/// The whole application state: feature name to feature substate.
///
/// `serde_json::Map` is BTreeMap-backed (no `preserve_order`), so iteration
/// and the serialized text are deterministic for equal trees.
pub type StateTree = Map<String, Value>;

/// Convert a decoded JSON value into a state tree.
///
/// Returns `None` for anything other than a JSON object.
pub fn into_state_tree(value: Value) -> Option<StateTree> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
