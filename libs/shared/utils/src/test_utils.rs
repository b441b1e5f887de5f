use std::sync::Arc;
use serde_json::json;

use shared_config::AppConfig;

pub struct TestConfig {
    pub appwrite_endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub appointment_collection_id: String,
    pub revalidate_url: String,
    pub clinic_name: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            appwrite_endpoint: "http://localhost:8080/v1".to_string(),
            project_id: "test-project".to_string(),
            api_key: "test-api-key".to_string(),
            database_id: "test-db".to_string(),
            appointment_collection_id: "test-appointments".to_string(),
            revalidate_url: String::new(),
            clinic_name: "CarePulse".to_string(),
        }
    }
}

impl TestConfig {
    /// Config whose Appwrite endpoint is served by a mock server at `uri`.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            appwrite_endpoint: format!("{}/v1", uri),
            ..Self::default()
        }
    }

    pub fn with_revalidate_url(mut self, url: &str) -> Self {
        self.revalidate_url = url.to_string();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            appwrite_endpoint: self.appwrite_endpoint.clone(),
            appwrite_project_id: self.project_id.clone(),
            appwrite_api_key: self.api_key.clone(),
            database_id: self.database_id.clone(),
            appointment_collection_id: self.appointment_collection_id.clone(),
            revalidate_url: self.revalidate_url.clone(),
            revalidate_secret: String::new(),
            clinic_name: self.clinic_name.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    /// Mock-server path of the appointment collection's documents.
    pub fn documents_path(&self) -> String {
        format!(
            "/v1/databases/{}/collections/{}/documents",
            self.database_id, self.appointment_collection_id
        )
    }

    pub fn document_path(&self, document_id: &str) -> String {
        format!("{}/{}", self.documents_path(), document_id)
    }
}

pub struct MockAppwriteResponses;

impl MockAppwriteResponses {
    pub fn appointment_document(
        id: &str,
        primary_physician: &str,
        status: &str,
        schedule: &str,
    ) -> serde_json::Value {
        json!({
            "$id": id,
            "$collectionId": "test-appointments",
            "$databaseId": "test-db",
            "$createdAt": "2024-04-20T09:30:00.000+00:00",
            "$updatedAt": "2024-04-20T09:30:00.000+00:00",
            "$permissions": [],
            "userId": "user-1",
            "patient": "patient-1",
            "primaryPhysician": primary_physician,
            "schedule": schedule,
            "reason": "Annual check-up",
            "note": null,
            "status": status,
            "cancellationReason": null
        })
    }

    pub fn document_list(total: u64, documents: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "total": total,
            "documents": documents
        })
    }

    pub fn sms_message(message_id: &str, user_id: &str) -> serde_json::Value {
        json!({
            "$id": message_id,
            "$createdAt": "2024-04-20T09:30:00.000+00:00",
            "$updatedAt": "2024-04-20T09:30:00.000+00:00",
            "providerType": "sms",
            "topics": [],
            "users": [user_id],
            "targets": [],
            "deliveredTotal": 0,
            "status": "processing"
        })
    }

    pub fn error_response(code: u16, kind: &str, message: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code,
            "type": kind,
            "version": "1.5.7"
        })
    }

    pub fn document_not_found() -> serde_json::Value {
        Self::error_response(
            404,
            "document_not_found",
            "Document with the requested ID could not be found.",
        )
    }
}
