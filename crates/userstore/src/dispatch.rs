//! Operation dispatcher.
//!
//! The top-level entry point: parses the request envelope, routes the
//! operation to its engine, and maps the result or failure into the
//! uniform response envelope. This is the only place an `OpError`
//! becomes a wire error; the dispatcher itself holds no state between
//! invocations.

use userstore_core::storage::UserStore;
use userstore_core::user::{sample, OpError, Outcome, Request, Response, UserRecord};

use crate::config::Config;
use crate::ops::{batch, paginate, retry};

/// Handles one request envelope and produces one response envelope.
pub async fn dispatch<S>(store: &S, config: &Config, body: &str) -> Response
where
    S: UserStore + ?Sized,
{
    let request = match Request::from_json(body) {
        Ok(request) => request,
        Err(error) => {
            tracing::warn!(%error, "rejected request envelope");
            return Response::failure(&error);
        }
    };

    let operation = request.operation_name();
    match execute(store, config, request).await {
        Ok(outcome) => {
            tracing::info!(operation, "operation completed");
            Response::success(outcome)
        }
        Err(error) => {
            tracing::warn!(operation, kind = error.kind(), %error, "operation failed");
            Response::failure(&error)
        }
    }
}

async fn execute<S>(
    store: &S,
    config: &Config,
    request: Request,
) -> Result<Option<Outcome>, OpError>
where
    S: UserStore + ?Sized,
{
    match request {
        Request::PutItem {
            name,
            address,
            email,
            phone,
        } => {
            let record = UserRecord::create(name, address, email, phone);
            retry::with_retry(config, || store.put(&record)).await?;
            tracing::info!(user_id = %record.id, "created record");
            Ok(Some(Outcome::Record(record)))
        }
        Request::BatchWriteItem { user_count } => {
            let records = sample::synthetic_users(user_count);
            let written = batch::write_all(store, config, records).await?;
            tracing::info!(user_count, "batch write completed");
            Ok(Some(Outcome::Records(written)))
        }
        Request::GetItem { id } => {
            let record = retry::with_retry(config, || store.get(&id)).await?;
            Ok(record.map(Outcome::Record))
        }
        Request::UpdateItem { id, patch } => {
            let record = retry::with_retry(config, || store.update(&id, &patch)).await?;
            tracing::info!(user_id = %id, "updated record");
            Ok(Some(Outcome::Record(record)))
        }
        Request::QueryItems { id } => {
            let records = paginate::collect_query(store, config, &id).await?;
            Ok(Some(Outcome::Records(records)))
        }
        Request::DeleteItem { id } => {
            let record = retry::with_retry(config, || store.delete(&id)).await?;
            if record.is_some() {
                tracing::info!(user_id = %id, "deleted record");
            }
            Ok(record.map(Outcome::Record))
        }
        Request::ScanItems => {
            let records = paginate::collect_scan(store, config).await?;
            Ok(Some(Outcome::Records(records)))
        }
        Request::ItemCount => {
            let count = paginate::count_scan(store, config).await?;
            Ok(Some(Outcome::Count(count)))
        }
    }
}
