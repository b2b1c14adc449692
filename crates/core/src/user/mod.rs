//! The user domain: record types, the operation envelope, the error
//! taxonomy, and synthetic data generation.

mod envelope;
mod error;
pub mod sample;
mod types;

pub use envelope::{ErrorBody, Outcome, Request, Response};
pub use error::OpError;
pub use types::{UserPatch, UserRecord};
