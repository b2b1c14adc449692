//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `userstore_core::storage`.
//! Throttling classes map to `Throttled` so the retry layer can back
//! off; everything else is fatal for the invocation.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use userstore_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        GetItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("GetItem throttled: {e:?}"))
        }
        GetItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("GetItem request limit exceeded: {e:?}"))
        }
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("GetItem failed: {err:?}")),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("PutItem throttled: {e:?}"))
        }
        PutItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("PutItem request limit exceeded: {e:?}"))
        }
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("PutItem failed: {err:?}")),
    }
}

/// Map an UpdateItem SDK error to StoreError.
///
/// A failed existence condition means the update target is absent.
pub fn map_update_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    id: impl Into<String>,
) -> StoreError {
    let id = id.into();
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => StoreError::NotFound { id },
        UpdateItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("UpdateItem throttled: {e:?}"))
        }
        UpdateItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("UpdateItem request limit exceeded: {e:?}"))
        }
        UpdateItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("UpdateItem failed: {err:?}")),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("DeleteItem throttled: {e:?}"))
        }
        DeleteItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("DeleteItem request limit exceeded: {e:?}"))
        }
        DeleteItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("DeleteItem failed: {err:?}")),
    }
}

/// Map a BatchWriteItem SDK error to StoreError.
pub fn map_batch_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        BatchWriteItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("BatchWriteItem throttled: {e:?}"))
        }
        BatchWriteItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("BatchWriteItem request limit exceeded: {e:?}"))
        }
        BatchWriteItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("BatchWriteItem failed: {err:?}")),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StoreError {
    match err.into_service_error() {
        QueryError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("Query throttled: {e:?}"))
        }
        QueryError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("Query request limit exceeded: {e:?}"))
        }
        QueryError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("Query failed: {err:?}")),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    match err.into_service_error() {
        ScanError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(format!("Scan throttled: {e:?}"))
        }
        ScanError::RequestLimitExceeded(e) => {
            StoreError::Throttled(format!("Scan request limit exceeded: {e:?}"))
        }
        ScanError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("table not found".to_string())
        }
        err => StoreError::Unavailable(format!("Scan failed: {err:?}")),
    }
}
