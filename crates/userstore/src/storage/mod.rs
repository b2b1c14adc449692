//! Storage backend implementations.
//!
//! Concrete implementations of the `UserStore` port from
//! `userstore_core::storage`, selected at compile time via feature
//! flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): volatile in-memory backend, used by tests and
//!   local runs
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The binary picks `dynamodb` when that feature is enabled and falls
//! back to `inmemory` otherwise.

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb'. \
    Example: cargo build -p userstore --features dynamodb"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
