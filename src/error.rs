use thiserror::Error;

/// Failures reading or writing a persisted record.
///
/// Only the explicit `load` path surfaces these; `get` on a record store
/// logs them and falls back to the default record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be reached or the query failed.
    #[error("storage backend unavailable: {0}")]
    Backend(#[from] sqlx::Error),

    /// The stored value under `key` is not a valid record.
    #[error("stored value for '{key}' could not be parsed: {source}")]
    Parse {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be encoded for storage.
    #[error("record for '{key}' could not be serialized: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
