//! Operation engines that sit between the dispatcher and the store
//! port: retry/timeout guards, batch write chunking, and pagination.

pub mod batch;
pub mod paginate;
pub mod retry;
