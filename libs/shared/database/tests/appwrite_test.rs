use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::{AppwriteClient, AppwriteError, DocumentStore, Messaging, Query};
use shared_utils::test_utils::{MockAppwriteResponses, TestConfig};

async fn setup() -> (MockServer, TestConfig, AppwriteClient) {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri());
    let client = AppwriteClient::new(&config.to_app_config());
    (mock_server, config, client)
}

#[tokio::test]
async fn test_create_document_sends_id_and_data() {
    let (mock_server, config, client) = setup().await;
    let doc = MockAppwriteResponses::appointment_document("appt-1", "Dr. Lee", "pending", "2024-05-01T10:00:00.000+00:00");

    Mock::given(method("POST"))
        .and(path(config.documents_path()))
        .and(header("X-Appwrite-Project", "test-project"))
        .and(header("X-Appwrite-Key", "test-api-key"))
        .and(body_json(json!({
            "documentId": "appt-1",
            "data": { "primaryPhysician": "Dr. Lee" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&doc))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = client
        .create_document("test-db", "test-appointments", "appt-1", json!({ "primaryPhysician": "Dr. Lee" }))
        .await
        .unwrap();

    assert_eq!(created["$id"], "appt-1");
}

#[tokio::test]
async fn test_get_document_not_found() {
    let (mock_server, config, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config.document_path("missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(MockAppwriteResponses::document_not_found()))
        .mount(&mock_server)
        .await;

    let result = client.get_document("test-db", "test-appointments", "missing").await;

    assert_matches!(result, Err(AppwriteError::NotFound(msg)) if msg.contains("document_not_found"));
}

#[tokio::test]
async fn test_list_documents_passes_queries() {
    let (mock_server, config, client) = setup().await;
    let docs = vec![
        MockAppwriteResponses::appointment_document("a2", "Dr. Lee", "scheduled", "2024-05-02T10:00:00.000+00:00"),
        MockAppwriteResponses::appointment_document("a1", "Dr. Lee", "pending", "2024-05-01T10:00:00.000+00:00"),
    ];

    Mock::given(method("GET"))
        .and(path(config.documents_path()))
        .and(query_param("queries[]", r#"{"method":"orderDesc","attribute":"$createdAt"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockAppwriteResponses::document_list(7, docs)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let list = client
        .list_documents("test-db", "test-appointments", &[Query::order_desc("$createdAt")])
        .await
        .unwrap();

    assert_eq!(list.total, 7);
    assert_eq!(list.documents.len(), 2);
    assert_eq!(list.documents[0]["$id"], "a2");
}

#[tokio::test]
async fn test_update_document_wraps_patch_in_data() {
    let (mock_server, config, client) = setup().await;
    let doc = MockAppwriteResponses::appointment_document("appt-1", "Dr. Lee", "cancelled", "2024-05-01T10:00:00.000+00:00");

    Mock::given(method("PATCH"))
        .and(path(config.document_path("appt-1")))
        .and(body_json(json!({ "data": { "status": "cancelled" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&doc))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated = client
        .update_document("test-db", "test-appointments", "appt-1", json!({ "status": "cancelled" }))
        .await
        .unwrap();

    assert_eq!(updated["status"], "cancelled");
}

#[tokio::test]
async fn test_create_sms_targets_single_user() {
    let (mock_server, _config, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/messaging/messages/sms"))
        .and(body_json(json!({
            "messageId": "msg-1",
            "content": "hello",
            "topics": [],
            "users": ["user-1"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockAppwriteResponses::sms_message("msg-1", "user-1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let message = client
        .create_sms("msg-1", "hello", &[], &["user-1".to_string()])
        .await
        .unwrap();

    assert_eq!(message["users"], json!(["user-1"]));
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (mock_server, config, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config.document_path("appt-1")))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockAppwriteResponses::error_response(500, "general_unknown", "Server Error"),
        ))
        .mount(&mock_server)
        .await;

    let result = client.get_document("test-db", "test-appointments", "appt-1").await;

    assert_matches!(result, Err(AppwriteError::Api { status, .. }) if status.as_u16() == 500);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let (mock_server, config, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config.document_path("appt-1")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = client.get_document("test-db", "test-appointments", "appt-1").await;

    assert_matches!(result, Err(AppwriteError::Decode(_)));
}

#[tokio::test]
async fn test_traversal_id_never_leaves_collection() {
    let (mock_server, config, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockAppwriteResponses::appointment_document("p1", "Dr. Lee", "pending", "2024-05-01T10:00:00.000+00:00"),
        ))
        .mount(&mock_server)
        .await;

    let get = client
        .get_document("test-db", "test-appointments", "../../../patients/documents/p1")
        .await;
    let update = client
        .update_document("test-db", "test-appointments", "a/../../patients", json!({ "status": "cancelled" }))
        .await;

    assert_matches!(get, Err(AppwriteError::InvalidId(_)));
    assert_matches!(update, Err(AppwriteError::InvalidId(_)));

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received
        .iter()
        .all(|req| req.url.path().starts_with(&format!("{}/", config.documents_path()))));
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_path_segments_are_percent_encoded() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri());
    let client = AppwriteClient::new(&config.to_app_config());

    Mock::given(method("GET"))
        .and(path("/v1/databases/test-db/collections/team%2Fappointments/documents/appt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockAppwriteResponses::appointment_document("appt-1", "Dr. Lee", "pending", "2024-05-01T10:00:00.000+00:00"),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = client
        .get_document("test-db", "team/appointments", "appt-1")
        .await
        .unwrap();

    assert_eq!(document["$id"], "appt-1");
}
