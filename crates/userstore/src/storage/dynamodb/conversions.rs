//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps
//! and the user record, and for building partial-update expressions.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use userstore_core::storage::{PageToken, StoreError};
use userstore_core::user::{UserPatch, UserRecord};

// ============================================================================
// Attribute names (single-table layout)
// ============================================================================

pub const ATTR_ID: &str = "_id";
pub const ATTR_NAME: &str = "Name";
pub const ATTR_ADDRESS: &str = "Address";
pub const ATTR_EMAIL: &str = "Email";
pub const ATTR_PHONE: &str = "Phone";

// ============================================================================
// Record conversions
// ============================================================================

/// Convert a UserRecord to a DynamoDB item.
///
/// Absent attributes are omitted entirely; encoding then decoding a
/// record yields an attribute-for-attribute-equal record.
pub fn user_to_item(record: &UserRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        ATTR_ID.to_string(),
        AttributeValue::S(record.id.clone()),
    );

    for (attr, value) in [
        (ATTR_NAME, &record.name),
        (ATTR_ADDRESS, &record.address),
        (ATTR_EMAIL, &record.email),
        (ATTR_PHONE, &record.phone),
    ] {
        if let Some(value) = value {
            item.insert(attr.to_string(), AttributeValue::S(value.clone()));
        }
    }

    item
}

/// Convert a DynamoDB item to a UserRecord.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: get_string(item, ATTR_ID)?,
        name: get_optional_string(item, ATTR_NAME)?,
        address: get_optional_string(item, ATTR_ADDRESS)?,
        email: get_optional_string(item, ATTR_EMAIL)?,
        phone: get_optional_string(item, ATTR_PHONE)?,
    })
}

// ============================================================================
// Update expressions
// ============================================================================

/// Build the `SET` update expression for a patch.
///
/// Only the mentioned attributes appear in the expression, so the store
/// merges the patch instead of overwriting the item. The returned name
/// map already carries the `#id` alias used by the caller's existence
/// condition.
pub fn patch_update_expression(
    patch: &UserPatch,
) -> (String, HashMap<String, String>, HashMap<String, AttributeValue>) {
    let mut assignments = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    names.insert("#id".to_string(), ATTR_ID.to_string());

    for (attr, value) in [
        (ATTR_NAME, &patch.name),
        (ATTR_ADDRESS, &patch.address),
        (ATTR_EMAIL, &patch.email),
        (ATTR_PHONE, &patch.phone),
    ] {
        if let Some(value) = value {
            let name_key = format!("#{attr}");
            let value_key = format!(":{}", attr.to_lowercase());
            assignments.push(format!("{name_key} = {value_key}"));
            names.insert(name_key, attr.to_string());
            values.insert(value_key, AttributeValue::S(value.clone()));
        }
    }

    (format!("SET {}", assignments.join(", ")), names, values)
}

// ============================================================================
// Continuation tokens
// ============================================================================

/// Convert a continuation token back into an exclusive start key.
pub fn token_to_key(token: &PageToken) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        ATTR_ID.to_string(),
        AttributeValue::S(token.as_str().to_string()),
    )])
}

/// Convert a last-evaluated key into a continuation token.
pub fn key_to_token(key: &HashMap<String, AttributeValue>) -> Result<PageToken, StoreError> {
    Ok(PageToken::new(get_string(key, ATTR_ID)?))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::Encoding(format!("missing or invalid field: {key}")))
}

/// Get an optional string attribute.
///
/// Absence is fine; a present attribute of any other type is an
/// encoding failure rather than a silently dropped value.
fn get_optional_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<String>, StoreError> {
    match item.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_s()
            .map(|s| Some(s.to_string()))
            .map_err(|_| StoreError::Encoding(format!("missing or invalid field: {key}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            name: Some("Ann Alvarez".to_string()),
            address: Some("1 Elm St, Springfield".to_string()),
            email: Some("ann.alvarez@example.com".to_string()),
            phone: Some("555-0100".to_string()),
        }
    }

    #[test]
    fn test_user_round_trip() {
        let user = sample_user();
        let item = user_to_item(&user);
        let parsed = item_to_user(&item).unwrap();

        assert_eq!(user, parsed);
    }

    #[test]
    fn test_sparse_user_round_trip() {
        let user = UserRecord::with_id("abc").with_name("Ann");
        let item = user_to_item(&user);

        assert!(!item.contains_key(ATTR_EMAIL));
        assert_eq!(item_to_user(&item).unwrap(), user);
    }

    #[test]
    fn test_item_has_correct_attribute_names() {
        let item = user_to_item(&sample_user());

        assert_eq!(
            item.get(ATTR_ID).unwrap().as_s().unwrap(),
            "550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(item.get(ATTR_NAME).unwrap().as_s().unwrap(), "Ann Alvarez");
        assert_eq!(item.get(ATTR_PHONE).unwrap().as_s().unwrap(), "555-0100");
    }

    #[test]
    fn test_item_missing_id_fails() {
        let mut item = user_to_item(&sample_user());
        item.remove(ATTR_ID);

        assert!(matches!(
            item_to_user(&item),
            Err(StoreError::Encoding(_))
        ));
    }

    #[test]
    fn test_item_with_non_string_attribute_fails() {
        let mut item = user_to_item(&sample_user());
        item.insert(ATTR_PHONE.to_string(), AttributeValue::N("42".to_string()));

        assert!(matches!(
            item_to_user(&item),
            Err(StoreError::Encoding(_))
        ));
    }

    #[test]
    fn test_patch_update_expression_mentions_only_patched_fields() {
        let patch = UserPatch::new().with_name("Annie").with_phone("555-0199");
        let (expression, names, values) = patch_update_expression(&patch);

        assert_eq!(expression, "SET #Name = :name, #Phone = :phone");
        assert_eq!(names.get("#Name").unwrap(), "Name");
        assert_eq!(names.get("#Phone").unwrap(), "Phone");
        assert_eq!(names.get("#id").unwrap(), "_id");
        assert_eq!(
            values.get(":name").unwrap().as_s().unwrap(),
            "Annie"
        );
        assert!(!names.contains_key("#Address"));
        assert!(!values.contains_key(":address"));
    }

    #[test]
    fn test_token_round_trip() {
        let token = PageToken::new("abc-123");
        let key = token_to_key(&token);

        assert_eq!(key_to_token(&key).unwrap(), token);
    }
}
