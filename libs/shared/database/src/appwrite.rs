use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::{is_valid_id, AppwriteError};
use crate::store::{DocumentList, DocumentStore, Messaging, Query};

/// Client for the Appwrite REST API (databases and messaging services).
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
}

impl AppwriteClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.appwrite_endpoint.trim_end_matches('/').to_string(),
            project_id: config.appwrite_project_id.clone(),
            api_key: config.appwrite_api_key.clone(),
        }
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, AppwriteError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .header("Content-Type", "application/json");

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Appwrite API error ({}): {}", status, response_text);
            return Err(AppwriteError::from_response(status, &response_text));
        }

        Ok(serde_json::from_str(&response_text)?)
    }

    fn documents_path(database_id: &str, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            urlencoding::encode(database_id),
            urlencoding::encode(collection_id)
        )
    }

    fn document_path(
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<String, AppwriteError> {
        if !is_valid_id(document_id) {
            error!("Rejected invalid document id {:?}", document_id);
            return Err(AppwriteError::InvalidId(document_id.to_string()));
        }

        Ok(format!(
            "{}/{}",
            Self::documents_path(database_id, collection_id),
            urlencoding::encode(document_id)
        ))
    }
}

#[async_trait]
impl DocumentStore for AppwriteClient {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, AppwriteError> {
        if !is_valid_id(document_id) {
            return Err(AppwriteError::InvalidId(document_id.to_string()));
        }

        let path = Self::documents_path(database_id, collection_id);

        self.request(
            Method::POST,
            &path,
            &[],
            Some(json!({
                "documentId": document_id,
                "data": data,
            })),
        )
        .await
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Value, AppwriteError> {
        let path = Self::document_path(database_id, collection_id, document_id)?;

        self.request(Method::GET, &path, &[], None).await
    }

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList, AppwriteError> {
        let path = Self::documents_path(database_id, collection_id);

        let params = queries
            .iter()
            .map(|q| q.to_query_string().map(|s| ("queries[]", s)))
            .collect::<Result<Vec<_>, _>>()?;

        self.request(Method::GET, &path, &params, None).await
    }

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, AppwriteError> {
        let path = Self::document_path(database_id, collection_id, document_id)?;

        self.request(Method::PATCH, &path, &[], Some(json!({ "data": data })))
            .await
    }
}

#[async_trait]
impl Messaging for AppwriteClient {
    async fn create_sms(
        &self,
        message_id: &str,
        content: &str,
        topics: &[String],
        users: &[String],
    ) -> Result<Value, AppwriteError> {
        self.request(
            Method::POST,
            "/messaging/messages/sms",
            &[],
            Some(json!({
                "messageId": message_id,
                "content": content,
                "topics": topics,
                "users": users,
            })),
        )
        .await
    }
}
