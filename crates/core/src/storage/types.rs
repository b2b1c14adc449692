use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// An opaque continuation token returned by a paged read.
///
/// The token's content belongs to the backend that produced it; callers
/// only hand it back unchanged to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken(pub String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a query or scan.
///
/// A populated `next` means more results remain; `None` terminates the
/// pagination loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<UserRecord>,
    pub next: Option<PageToken>,
}

impl Page {
    /// A final page holding the given records.
    pub fn last(records: Vec<UserRecord>) -> Self {
        Self {
            records,
            next: None,
        }
    }
}
