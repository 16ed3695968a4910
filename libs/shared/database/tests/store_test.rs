use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::KioskConfig;
use shared_database::store::{DocumentId, DocumentStoreClient};

fn test_config(base_url: &str) -> KioskConfig {
    KioskConfig {
        database_url: base_url.to_string(),
        database_api_key: "test-api-key".to_string(),
        database_name: "kiosk_test".to_string(),
        port: 8000,
    }
}

#[tokio::test]
async fn insert_one_returns_the_store_assigned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/insertOne"))
        .and(header("apikey", "test-api-key"))
        .and(body_partial_json(json!({
            "database": "kiosk_test",
            "collection": "appointment",
            "document": { "patient_name": "Ada Lovelace" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "insertedId": "656f00000000000000000001"
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let id = client
        .insert_one("appointment", json!({ "patient_name": "Ada Lovelace" }))
        .await
        .unwrap();

    assert_eq!(id, DocumentId("656f00000000000000000001".to_string()));
}

#[tokio::test]
async fn count_uses_match_count_pipeline_and_defaults_to_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/aggregate"))
        .and(body_partial_json(json!({
            "pipeline": [
                { "$match": { "department": "General", "date": "2024-05-01" } },
                { "$count": "count" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": []
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let count = client
        .count(
            "appointment",
            json!({ "department": "General", "date": "2024-05-01" }),
        )
        .await
        .unwrap();

    assert_eq!(count, 0);
}

#[tokio::test]
async fn count_reads_the_aggregated_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/aggregate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{ "count": 17 }]
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let count = client.count("appointment", json!({})).await.unwrap();

    assert_eq!(count, 17);
}

#[tokio::test]
async fn find_one_maps_null_document_to_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document": null
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let document = client
        .find_one("appointment", json!({ "booking_code": "CAR20240501-001" }))
        .await
        .unwrap();

    assert!(document.is_none());
}

#[tokio::test]
async fn update_one_wraps_set_fields_and_returns_matched_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/updateOne"))
        .and(body_partial_json(json!({
            "filter": { "_id": "656f00000000000000000001" },
            "update": { "$set": { "status": "checked_in" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matchedCount": 1,
            "modifiedCount": 1
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let matched = client
        .update_one(
            "appointment",
            json!({ "_id": "656f00000000000000000001" }),
            json!({ "status": "checked_in" }),
        )
        .await
        .unwrap();

    assert_eq!(matched, 1);
}

#[tokio::test]
async fn non_success_status_surfaces_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(503).set_body_string("store offline"))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let result = client.find("appointment", json!({})).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("503"));
}

#[tokio::test]
async fn list_collection_names_reads_collections_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/listCollections"))
        .and(body_partial_json(json!({ "database": "kiosk_test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": ["appointment", "audit_log"]
        })))
        .mount(&mock_server)
        .await;

    let client = DocumentStoreClient::new(&test_config(&mock_server.uri()));
    let names = client.list_collection_names().await.unwrap();

    assert_eq!(names, vec!["appointment", "audit_log"]);
}
