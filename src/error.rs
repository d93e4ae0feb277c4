//! Failure taxonomy for field value resolution

use std::sync::Arc;

use thiserror::Error;

use crate::fields::FieldKey;

/// Transport-level catalog fetch failure.
///
/// Cloneable so the single outcome of one fetch attempt can be delivered to
/// every resolution call that was waiting on it.
#[derive(Debug, Clone, Error)]
#[error("field catalog fetch failed: {0}")]
pub struct CatalogFetchError(pub Arc<anyhow::Error>);

impl CatalogFetchError {
    pub fn new(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

/// Why a symbolic value could not be resolved to a numeric option id
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Input was blank after trimming. Caller error; not retryable.
    #[error("empty {key} value")]
    EmptyValue { key: FieldKey },

    /// The catalog fetch failed, or no definition matched the field's hint
    /// tokens. Retryable when the cause was a transient fetch failure, since
    /// failed fetches are never cached.
    #[error("unable to resolve {key}; system field metadata is unavailable")]
    FieldUnavailable {
        key: FieldKey,
        #[source]
        source: Option<CatalogFetchError>,
    },

    /// The field exists but no option matches the given label. The message
    /// enumerates the valid options so the failure is self-diagnosing.
    #[error("unknown {key} value \"{value}\". Available values: {available}")]
    UnknownValue {
        key: FieldKey,
        value: String,
        available: String,
    },

    /// More than one option matches the normalized label. Surfaced instead
    /// of silently picking one.
    #[error("ambiguous {key} value \"{value}\"; matches multiple options: {matches}")]
    AmbiguousValue {
        key: FieldKey,
        value: String,
        matches: String,
    },
}
