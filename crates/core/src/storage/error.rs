use thiserror::Error;

/// Errors a store backend can report.
///
/// Backends map their native failures onto these variants; the
/// operation layer decides which are transient (retried with backoff)
/// and which are fatal for the invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The targeted record does not exist (conditional update failed).
    #[error("no record with id {id}")]
    NotFound { id: String },
    /// Transient capacity rejection; safe to retry after a backoff.
    #[error("store throttled: {0}")]
    Throttled(String),
    /// I/O failure, timeout, or any other non-retriable store fault.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A value cannot be represented in, or read back from, the store's
    /// attribute format.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = StoreError::NotFound {
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "no record with id abc-123");
    }

    #[test]
    fn test_throttled_display() {
        let error = StoreError::Throttled("throughput exceeded".to_string());
        assert_eq!(error.to_string(), "store throttled: throughput exceeded");
    }

    #[test]
    fn test_unavailable_display() {
        let error = StoreError::Unavailable("timed out after 5s".to_string());
        assert_eq!(error.to_string(), "store unavailable: timed out after 5s");
    }
}
