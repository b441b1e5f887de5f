use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppwriteError;

/// A single Appwrite query, serialized as `{"method": ..., "attribute": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub method: String,
    pub attribute: String,
}

impl Query {
    pub fn order_desc(attribute: &str) -> Self {
        Self {
            method: "orderDesc".to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub fn to_query_string(&self) -> Result<String, AppwriteError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Value>,
}

/// Document operations scoped to a database and collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, AppwriteError>;

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Value, AppwriteError>;

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, AppwriteError>;

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, AppwriteError>;
}

#[async_trait]
pub trait Messaging: Send + Sync {
    /// Sends an SMS to the given topics and users. Returns the message record.
    async fn create_sms(
        &self,
        message_id: &str,
        content: &str,
        topics: &[String],
        users: &[String],
    ) -> Result<Value, AppwriteError>;
}
