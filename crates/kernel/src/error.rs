/// Errors from registering providers with, or reading from, the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("feature `{0}` is already registered")]
    DuplicateFeature(String),
    #[error("meta-reducers can only be registered at boot, {count} offered to a late mount")]
    LateMetaReducer { count: usize },
    #[error("failed to encode initial state of feature `{key}`: {source}")]
    EncodeInitial {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode state slot `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
