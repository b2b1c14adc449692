use thiserror::Error;

use crate::storage::StoreError;

/// Errors an operation can surface to the caller.
///
/// Every sub-behavior returns one of these; raw store errors never
/// escape past the storage layer. The dispatcher maps the variant to
/// the response envelope's `error.kind` string via [`OpError::kind`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpError {
    /// Malformed or unknown operation, or a missing required field.
    /// Never retried.
    #[error("{0}")]
    Validation(String),

    /// The update target does not exist. Update never creates.
    #[error("no record with id {id}")]
    NotFound { id: String },

    /// A batch write left items unprocessed after the retry budget.
    /// The already-written prefix is durable; the listed ids are not.
    #[error("batch write left {} record(s) unprocessed: {}", unprocessed.len(), unprocessed.join(", "))]
    PartialWrite {
        written: usize,
        unprocessed: Vec<String>,
    },

    /// Store I/O failure or timeout, fatal for this invocation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A value cannot be represented in the store's attribute format.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl OpError {
    /// The `kind` string used in the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            OpError::Validation(_) => "ValidationError",
            OpError::NotFound { .. } => "NotFoundError",
            OpError::PartialWrite { .. } => "PartialWriteError",
            OpError::StoreUnavailable(_) => "StoreUnavailableError",
            OpError::Encoding(_) => "EncodingError",
        }
    }
}

impl From<StoreError> for OpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => OpError::NotFound { id },
            // Throttling that reaches this point has exhausted its retry
            // budget and counts as unavailability.
            StoreError::Throttled(msg) => OpError::StoreUnavailable(msg),
            StoreError::Unavailable(msg) => OpError::StoreUnavailable(msg),
            StoreError::Encoding(msg) => OpError::Encoding(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(
            OpError::Validation("bad".to_string()).kind(),
            "ValidationError"
        );
        assert_eq!(
            OpError::NotFound {
                id: "x".to_string()
            }
            .kind(),
            "NotFoundError"
        );
        assert_eq!(
            OpError::PartialWrite {
                written: 3,
                unprocessed: vec!["a".to_string()]
            }
            .kind(),
            "PartialWriteError"
        );
        assert_eq!(
            OpError::StoreUnavailable("down".to_string()).kind(),
            "StoreUnavailableError"
        );
        assert_eq!(
            OpError::Encoding("bad value".to_string()).kind(),
            "EncodingError"
        );
    }

    #[test]
    fn test_partial_write_display_names_ids() {
        let err = OpError::PartialWrite {
            written: 24,
            unprocessed: vec!["id-1".to_string(), "id-2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "batch write left 2 record(s) unprocessed: id-1, id-2"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: OpError = StoreError::NotFound {
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err,
            OpError::NotFound {
                id: "abc".to_string()
            }
        );

        let err: OpError = StoreError::Throttled("throughput exceeded".to_string()).into();
        assert_eq!(err.kind(), "StoreUnavailableError");

        let err: OpError = StoreError::Encoding("binary attribute".to_string()).into();
        assert_eq!(err.kind(), "EncodingError");
    }
}
