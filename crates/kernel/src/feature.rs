use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

/// A typed slice of the state tree, owned by one feature.
///
/// The store only ever sees the slot as JSON; the feature decodes it into
/// `State`, reduces, and the result is encoded back into the slot.
pub trait Feature<A>: 'static {
    type State: Serialize + DeserializeOwned + Default;

    /// Key of this feature's slot in the state tree.
    fn key(&self) -> &str;

    /// Compute the next feature state for an action.
    fn reduce(&self, state: Self::State, action: &A) -> Self::State;

    /// State written into the slot when the feature is registered.
    fn initial_state(&self) -> Self::State {
        Self::State::default()
    }
}

type SlotReducer<A> = Box<dyn Fn(Option<&Value>, &A) -> Value>;
type SlotInitializer = Box<dyn Fn() -> Result<Value, serde_json::Error>>;

/// Type-erased feature registered with the store.
pub(crate) struct FeatureSlot<A> {
    key: String,
    initial: SlotInitializer,
    reduce: SlotReducer<A>,
}

impl<A: 'static> FeatureSlot<A> {
    pub(crate) fn new<F: Feature<A>>(feature: F) -> Self {
        let key = feature.key().to_owned();
        let feature = Rc::new(feature);

        let initial = {
            let feature = feature.clone();
            Box::new(move || serde_json::to_value(feature.initial_state())) as SlotInitializer
        };

        let slot_key = key.clone();
        let reduce = Box::new(move |slot: Option<&Value>, action: &A| {
            let state = decode_slot::<F::State>(&slot_key, slot);
            let next = feature.reduce(state, action);
            match serde_json::to_value(next) {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!(feature = %slot_key, "failed to encode feature state: {e}");
                    slot.cloned().unwrap_or(Value::Null)
                }
            }
        }) as SlotReducer<A>;

        Self {
            key,
            initial,
            reduce,
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn initial(&self) -> Result<Value, StoreError> {
        (self.initial)().map_err(|source| StoreError::EncodeInitial {
            key: self.key.clone(),
            source,
        })
    }

    pub(crate) fn reduce(&self, slot: Option<&Value>, action: &A) -> Value {
        (self.reduce)(slot, action)
    }
}

/// Decode a slot, falling back to the default state when it is absent or
/// does not match the feature's shape.
fn decode_slot<S: DeserializeOwned + Default>(key: &str, slot: Option<&Value>) -> S {
    let Some(value) = slot else {
        return S::default();
    };
    match S::deserialize(value) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(feature = %key, "state slot does not decode, using default: {e}");
            S::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Tally {
        count: u32,
    }

    struct TallyFeature;

    impl Feature<u32> for TallyFeature {
        type State = Tally;

        fn key(&self) -> &str {
            "tally"
        }

        fn reduce(&self, state: Tally, action: &u32) -> Tally {
            Tally {
                count: state.count + action,
            }
        }
    }

    #[test]
    fn initial_slot_is_encoded_default() {
        let slot = FeatureSlot::new(TallyFeature);
        assert_eq!(slot.key(), "tally");
        assert_eq!(slot.initial().unwrap(), json!({"count": 0}));
    }

    #[test]
    fn reduces_existing_slot() {
        let slot = FeatureSlot::new(TallyFeature);
        let next = slot.reduce(Some(&json!({"count": 2})), &3);
        assert_eq!(next, json!({"count": 5}));
    }

    #[test]
    fn missing_slot_starts_from_default() {
        let slot = FeatureSlot::new(TallyFeature);
        assert_eq!(slot.reduce(None, &1), json!({"count": 1}));
    }

    #[test]
    fn malformed_slot_falls_back_to_default() {
        let slot = FeatureSlot::new(TallyFeature);
        let next = slot.reduce(Some(&json!("not a tally")), &4);
        assert_eq!(next, json!({"count": 4}));
    }
}
