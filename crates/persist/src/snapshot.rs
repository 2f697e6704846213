use serde_json::Value;
use shellstate_common::{StateTree, into_state_tree};

/// Errors from decoding or reconciling a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("persisted record is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("persisted record is a JSON {found}, expected an object")]
    NotAnObject { found: &'static str },
    #[error("current state has no router slot `{key}`")]
    MissingRouterState { key: String },
}

/// A copy of the state tree without the router slot.
///
/// Only built by [`strip`] and [`parse_snapshot`], both of which remove the
/// router slot, so a snapshot never carries a stored route location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(StateTree);

impl Snapshot {
    /// The empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_tree(&self) -> &StateTree {
        &self.0
    }

    pub fn into_tree(self) -> StateTree {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self` with every slot of `top` laid over it.
    pub fn overlay(&self, top: &Snapshot) -> Snapshot {
        Snapshot(merge_over(&self.0, &top.0))
    }

    /// Encode as a Persistence Record.
    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

/// Shallow copy of `state` with `router_key` removed.
pub fn strip(state: &StateTree, router_key: &str) -> Snapshot {
    let mut tree = state.clone();
    tree.remove(router_key);
    Snapshot(tree)
}

/// Shallow copy of `snapshot` with `router_key` set to the current session's
/// router slot.
pub fn reattach_router(
    snapshot: &Snapshot,
    current: &StateTree,
    router_key: &str,
) -> Result<StateTree, ReconcileError> {
    let router = current
        .get(router_key)
        .ok_or_else(|| ReconcileError::MissingRouterState {
            key: router_key.to_owned(),
        })?;
    let mut merged = snapshot.0.clone();
    merged.insert(router_key.to_owned(), router.clone());
    Ok(merged)
}

/// Shallow merge of two trees; slots in `overlay` win.
pub fn merge_over(base: &StateTree, overlay: &StateTree) -> StateTree {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Decode a Persistence Record.
///
/// Anything other than a JSON object is rejected. A router slot in the record
/// is dropped rather than trusted.
pub fn parse_snapshot(text: &str, router_key: &str) -> Result<Snapshot, ReconcileError> {
    let value: Value = serde_json::from_str(text)?;
    let found = json_type_name(&value);
    let mut tree = into_state_tree(value).ok_or(ReconcileError::NotAnObject { found })?;
    if tree.remove(router_key).is_some() {
        tracing::debug!(router_key, "discarded router slot found in persisted record");
    }
    Ok(Snapshot(tree))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> StateTree {
        into_state_tree(value).unwrap()
    }

    #[test]
    fn strip_removes_only_router() {
        let state = tree(json!({"flight": {"items": [{"id": 1}]}, "router": {"url": "/"}}));
        let snap = strip(&state, "router");
        assert_eq!(snap.as_tree(), &tree(json!({"flight": {"items": [{"id": 1}]}})));
        // Input untouched.
        assert!(state.contains_key("router"));
    }

    #[test]
    fn strip_then_reattach_is_identity() {
        let state = tree(json!({
            "flight": {"items": [{"id": 1, "date": "2026-10-14T08:00:00Z"}]},
            "router": {"url": "/flight-booking/flight-search"},
            "basket": {"3": true}
        }));
        let snap = strip(&state, "router");
        assert_eq!(reattach_router(&snap, &state, "router").unwrap(), state);
    }

    #[test]
    fn reattach_uses_current_router_never_stored() {
        let saved = tree(json!({"flight": {"items": []}, "router": {"url": "/r1"}}));
        let current = tree(json!({"router": {"url": "/r2"}}));
        let merged = reattach_router(&strip(&saved, "router"), &current, "router").unwrap();
        assert_eq!(merged.get("router"), Some(&json!({"url": "/r2"})));
        assert_eq!(merged.get("flight"), Some(&json!({"items": []})));
    }

    #[test]
    fn reattach_without_router_in_current_fails() {
        let err = reattach_router(&Snapshot::empty(), &StateTree::new(), "router").unwrap_err();
        assert!(matches!(err, ReconcileError::MissingRouterState { key } if key == "router"));
    }

    #[test]
    fn custom_router_key_is_honoured() {
        let state = tree(json!({"nav": {"url": "/a"}, "router": {"not": "special"}}));
        let snap = strip(&state, "nav");
        assert!(snap.as_tree().contains_key("router"));
        assert!(!snap.as_tree().contains_key("nav"));
    }

    #[test]
    fn merge_over_prefers_overlay() {
        let base = tree(json!({"a": 1, "b": 1}));
        let overlay = tree(json!({"b": 2, "c": 2}));
        assert_eq!(merge_over(&base, &overlay), tree(json!({"a": 1, "b": 2, "c": 2})));
    }

    #[test]
    fn overlay_keeps_router_out() {
        let live = strip(&tree(json!({"router": {"url": "/"}, "ticket": {"flights": []}})), "router");
        let cached = strip(&tree(json!({"ticket": {"flights": [{"id": 3}]}})), "router");
        let layered = live.overlay(&cached);
        assert_eq!(layered.as_tree(), &tree(json!({"ticket": {"flights": [{"id": 3}]}})));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            parse_snapshot("{not json", "router"),
            Err(ReconcileError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert!(matches!(
            parse_snapshot("[1,2]", "router"),
            Err(ReconcileError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            parse_snapshot("42", "router"),
            Err(ReconcileError::NotAnObject { found: "number" })
        ));
    }

    #[test]
    fn parse_drops_stored_router() {
        let snap = parse_snapshot(r#"{"flight":{},"router":{"url":"/old"}}"#, "router").unwrap();
        assert_eq!(snap.as_tree(), &tree(json!({"flight": {}})));
    }

    #[test]
    fn record_text_is_stable_through_parse() {
        let record = r#"{"flight":{"items":[{"id":1}]},"ticket":{"flights":[]}}"#;
        let snap = parse_snapshot(record, "router").unwrap();
        assert_eq!(snap.to_record().unwrap(), record);
    }
}
