//! DynamoDB store implementation.
//!
//! Implements the `UserStore` port from `userstore_core::storage` using
//! `aws-sdk-dynamodb` against a single table keyed by `_id`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, ReturnValue, WriteRequest};
use aws_sdk_dynamodb::Client;

use userstore_core::storage::{Page, PageToken, Result, StoreError, UserStore};
use userstore_core::user::{UserPatch, UserRecord};

use super::conversions::{
    item_to_user, key_to_token, patch_update_expression, token_to_key, user_to_item, ATTR_ID,
};
use super::error::{
    map_batch_error, map_delete_error, map_get_error, map_put_error, map_query_error,
    map_scan_error, map_update_error,
};

/// DynamoDB-backed user store.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        Self::new(client, table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(&self, id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl UserStore for DynamoDbStore {
    async fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, self.key(id))
            .send()
            .await
            .map_err(map_get_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: &UserRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(record)))
            .send()
            .await
            .map_err(map_put_error)?;

        Ok(())
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord> {
        let (expression, names, values) = patch_update_expression(patch);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, self.key(id))
            .update_expression(expression)
            // Update never creates: the existence condition turns an
            // absent target into a conditional-check failure.
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_error(e, id))?;

        let attributes = result.attributes.ok_or_else(|| {
            StoreError::Encoding("UpdateItem returned no attributes".to_string())
        })?;
        item_to_user(&attributes)
    }

    async fn delete(&self, id: &str) -> Result<Option<UserRecord>> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, self.key(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_error)?;

        match result.attributes {
            Some(attributes) => Ok(Some(item_to_user(&attributes)?)),
            None => Ok(None),
        }
    }

    async fn batch_put(&self, records: &[UserRecord]) -> Result<Vec<UserRecord>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let write_requests = records
            .iter()
            .map(|record| {
                let put = PutRequest::builder()
                    .set_item(Some(user_to_item(record)))
                    .build()
                    .map_err(|e| StoreError::Encoding(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let result = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, write_requests)
            .send()
            .await
            .map_err(map_batch_error)?;

        let mut unprocessed = Vec::new();
        if let Some(mut tables) = result.unprocessed_items {
            if let Some(requests) = tables.remove(&self.table_name) {
                for request in requests {
                    if let Some(put) = request.put_request {
                        unprocessed.push(item_to_user(put.item())?);
                    }
                }
            }
        }

        Ok(unprocessed)
    }

    async fn query_page(&self, id: &str, cursor: Option<PageToken>) -> Result<Page> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#id = :id")
            .expression_attribute_names("#id", ATTR_ID)
            .expression_attribute_values(":id", self.key(id));

        if let Some(token) = &cursor {
            request = request.set_exclusive_start_key(Some(token_to_key(token)));
        }

        let result = request.send().await.map_err(map_query_error)?;

        let records = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_user)
            .collect::<Result<Vec<_>>>()?;
        let next = match result.last_evaluated_key {
            Some(key) => Some(key_to_token(&key)?),
            None => None,
        };

        Ok(Page { records, next })
    }

    async fn scan_page(&self, cursor: Option<PageToken>) -> Result<Page> {
        let mut request = self.client.scan().table_name(&self.table_name);

        if let Some(token) = &cursor {
            request = request.set_exclusive_start_key(Some(token_to_key(token)));
        }

        let result = request.send().await.map_err(map_scan_error)?;

        let records = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_user)
            .collect::<Result<Vec<_>>>()?;
        let next = match result.last_evaluated_key {
            Some(key) => Some(key_to_token(&key)?),
            None => None,
        };

        Ok(Page { records, next })
    }
}
