//! Request and response envelopes for the operation dispatcher.
//!
//! One request envelope arrives per invocation, tagged by its
//! `operation` field; one response envelope goes back, carrying either a
//! success payload or a structured error, never both.

use serde::{Deserialize, Serialize};

use super::error::OpError;
use super::types::{UserPatch, UserRecord};

/// A tagged operation request.
///
/// Each variant carries only the fields its operation needs, so a
/// missing required field is a parse failure instead of an unchecked
/// access at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum Request {
    #[serde(rename = "putItem")]
    PutItem {
        name: String,
        address: String,
        email: String,
        phone: String,
    },
    #[serde(rename = "batchWriteItem")]
    BatchWriteItem {
        #[serde(rename = "userCount")]
        user_count: u32,
    },
    #[serde(rename = "getItem")]
    GetItem { id: String },
    #[serde(rename = "updateItem")]
    UpdateItem {
        id: String,
        #[serde(flatten)]
        patch: UserPatch,
    },
    #[serde(rename = "queryItems")]
    QueryItems { id: String },
    #[serde(rename = "deleteItem")]
    DeleteItem { id: String },
    #[serde(rename = "scanItems")]
    ScanItems,
    #[serde(rename = "itemCount")]
    ItemCount,
}

impl Request {
    /// Parses and validates a request envelope from its JSON body.
    ///
    /// A missing or unrecognized `operation`, a missing required field,
    /// or an operation-level constraint violation all surface as
    /// `ValidationError`.
    pub fn from_json(body: &str) -> Result<Self, OpError> {
        let request: Request = serde_json::from_str(body)
            .map_err(|e| OpError::Validation(format!("invalid request envelope: {e}")))?;
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<(), OpError> {
        match self {
            Request::GetItem { id }
            | Request::UpdateItem { id, .. }
            | Request::QueryItems { id }
            | Request::DeleteItem { id } => {
                if id.is_empty() {
                    return Err(OpError::Validation(format!(
                        "{} requires a non-empty id",
                        self.operation_name()
                    )));
                }
            }
            _ => {}
        }

        if let Request::UpdateItem { patch, .. } = self {
            if patch.is_empty() {
                return Err(OpError::Validation(
                    "updateItem requires at least one attribute field".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// The wire name of this operation, for logging and error messages.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Request::PutItem { .. } => "putItem",
            Request::BatchWriteItem { .. } => "batchWriteItem",
            Request::GetItem { .. } => "getItem",
            Request::UpdateItem { .. } => "updateItem",
            Request::QueryItems { .. } => "queryItems",
            Request::DeleteItem { .. } => "deleteItem",
            Request::ScanItems => "scanItems",
            Request::ItemCount => "itemCount",
        }
    }
}

/// A successful operation's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Record(UserRecord),
    Records(Vec<UserRecord>),
    Count(u64),
}

/// The uniform response envelope.
///
/// Exactly one of `result` and `error` is populated; a success with no
/// affected record (a `getItem` miss, an idempotent delete of an absent
/// id) leaves both `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub result: Option<Outcome>,
    pub error: Option<ErrorBody>,
}

/// The structured error carried by a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl Response {
    /// Builds a success envelope.
    pub fn success(result: impl Into<Option<Outcome>>) -> Self {
        Self {
            result: result.into(),
            error: None,
        }
    }

    /// Builds a failure envelope from an operation error.
    pub fn failure(error: &OpError) -> Self {
        Self {
            result: None,
            error: Some(ErrorBody {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_item() {
        let request = Request::from_json(
            r#"{"operation":"putItem","name":"Ann","address":"1 Elm St","email":"a@x.com","phone":"555-0100"}"#,
        )
        .unwrap();

        assert_eq!(
            request,
            Request::PutItem {
                name: "Ann".to_string(),
                address: "1 Elm St".to_string(),
                email: "a@x.com".to_string(),
                phone: "555-0100".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_put_item_missing_field() {
        let err = Request::from_json(r#"{"operation":"putItem","name":"Ann"}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_parse_batch_write_item() {
        let request =
            Request::from_json(r#"{"operation":"batchWriteItem","userCount":93}"#).unwrap();
        assert_eq!(request, Request::BatchWriteItem { user_count: 93 });
    }

    #[test]
    fn test_parse_batch_write_negative_count() {
        let err =
            Request::from_json(r#"{"operation":"batchWriteItem","userCount":-1}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_parse_update_item_flattens_patch() {
        let request =
            Request::from_json(r#"{"operation":"updateItem","id":"abc","name":"Annie"}"#).unwrap();

        match request {
            Request::UpdateItem { id, patch } => {
                assert_eq!(id, "abc");
                assert_eq!(patch.name, Some("Annie".to_string()));
                assert_eq!(patch.phone, None);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_item_without_attributes() {
        let err = Request::from_json(r#"{"operation":"updateItem","id":"abc"}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_parse_unit_operations() {
        assert_eq!(
            Request::from_json(r#"{"operation":"scanItems"}"#).unwrap(),
            Request::ScanItems
        );
        assert_eq!(
            Request::from_json(r#"{"operation":"itemCount"}"#).unwrap(),
            Request::ItemCount
        );
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = Request::from_json(r#"{"operation":"frobnicate","id":"abc"}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_parse_missing_operation() {
        let err = Request::from_json(r#"{"id":"abc"}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_parse_empty_id() {
        let err = Request::from_json(r#"{"operation":"getItem","id":""}"#).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = Response::success(Outcome::Count(42));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["result"], 42);
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_empty_success_envelope_shape() {
        let response = Response::success(None);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["result"].is_null());
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response = Response::failure(&OpError::NotFound {
            id: "abc".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["result"].is_null());
        assert_eq!(json["error"]["kind"], "NotFoundError");
        assert_eq!(json["error"]["message"], "no record with id abc");
    }

    #[test]
    fn test_record_outcome_serializes_flat() {
        let record = UserRecord::with_id("abc").with_name("Ann");
        let response = Response::success(Outcome::Record(record));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["result"]["id"], "abc");
        assert_eq!(json["result"]["name"], "Ann");
    }
}
