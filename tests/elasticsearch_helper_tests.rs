mod common;

use std::time::Duration;

use esplugin::elasticsearch::ElasticsearchHelper;
use esplugin::error::ToolsError;
use serde_json::{json, Value};

use common::{spawn_mock, ELASTIC_BASIC_AUTH, UNREACHABLE};

fn elastic(address: &str) -> ElasticsearchHelper {
    ElasticsearchHelper::new(
        address,
        Some("elastic".to_string()),
        Some("password".to_string()),
    )
    .expect("helper")
}

#[tokio::test]
async fn test_cluster_health() {
    let address = spawn_mock(Some(ELASTIC_BASIC_AUTH)).await;
    let health = elastic(&address).cluster_health().await.unwrap();
    assert_eq!(health["status"], "green");
    assert_eq!(health["number_of_nodes"], 1);
}

#[tokio::test]
async fn test_cluster_info() {
    let address = spawn_mock(None).await;
    let info = elastic(&address).cluster_info().await.unwrap();
    assert_eq!(info["version"]["number"], "8.11.0");
}

#[tokio::test]
async fn test_request_sends_json_headers_and_basic_auth() {
    let address = spawn_mock(None).await;
    let echo = elastic(&address)
        .request("get", "/_test", None, None)
        .await
        .unwrap();
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["path"], "/_test");
    assert_eq!(echo["authorization"], ELASTIC_BASIC_AUTH);
    assert_eq!(echo["content_type"], "application/json");
    assert_eq!(echo["accept"], "application/json");
}

#[tokio::test]
async fn test_anonymous_helper_sends_no_auth() {
    let address = spawn_mock(None).await;
    let helper = ElasticsearchHelper::new(&address, None, None).unwrap();
    let echo = helper.request("GET", "_test", None, None).await.unwrap();
    assert_eq!(echo["authorization"], Value::Null);
}

#[tokio::test]
async fn test_wrong_credentials_surface_http_error() {
    let address = spawn_mock(Some(ELASTIC_BASIC_AUTH)).await;
    let helper = ElasticsearchHelper::new(
        &address,
        Some("elastic".to_string()),
        Some("wrong".to_string()),
    )
    .unwrap();
    let err = helper.cluster_health().await.unwrap_err();
    match err {
        ToolsError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("security_exception"));
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_posts_query() {
    let address = spawn_mock(None).await;
    let query = json!({"query": {"match_all": {}}});
    let echo = elastic(&address).search("test-index", &query).await.unwrap();
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/test-index/_search");
    assert_eq!(echo["body"], query);
}

fn route(echo: &Value) -> (&str, &str) {
    (
        echo["method"].as_str().unwrap_or_default(),
        echo["path"].as_str().unwrap_or_default(),
    )
}

#[tokio::test]
async fn test_document_operations_use_fixed_paths() {
    let address = spawn_mock(None).await;
    let helper = elastic(&address);
    let doc = json!({"message": "hello"});

    let echo = helper.write_to_index("logs", &doc).await.unwrap();
    assert_eq!(route(&echo), ("POST", "/logs/_doc"));

    let echo = helper.update_document("logs", "7", &doc).await.unwrap();
    assert_eq!(route(&echo), ("PUT", "/logs/_doc/7"));
    assert_eq!(echo["body"], doc);

    let echo = helper.get_document("logs", "7").await.unwrap();
    assert_eq!(route(&echo), ("GET", "/logs/_doc/7"));

    let echo = helper.delete_from_index("logs", "7").await.unwrap();
    assert_eq!(route(&echo), ("DELETE", "/logs/_doc/7"));

    let echo = helper.get_index_mapping("logs").await.unwrap();
    assert_eq!(echo["path"], "/logs/_mapping");
    let echo = helper.get_index_settings("logs").await.unwrap();
    assert_eq!(echo["path"], "/logs/_settings");
    let echo = helper.get_index_stats("logs").await.unwrap();
    assert_eq!(echo["path"], "/logs/_stats");
}

#[tokio::test]
async fn test_document_ids_stay_in_their_segment() {
    let address = spawn_mock(None).await;
    let helper = elastic(&address);

    let echo = helper.get_document("logs", "a/b").await.unwrap();
    assert_eq!(route(&echo), ("GET", "/logs/_doc/a%2Fb"));

    let echo = helper.delete_from_index("logs", "a?x=1").await.unwrap();
    assert_eq!(route(&echo), ("DELETE", "/logs/_doc/a%3Fx=1"));

    let echo = helper
        .update_document("logs", "a#b", &json!({"n": 1}))
        .await
        .unwrap();
    assert_eq!(route(&echo), ("PUT", "/logs/_doc/a%23b"));
    assert_eq!(echo["body"], json!({"n": 1}));
}

#[tokio::test]
async fn test_non_json_and_empty_bodies() {
    let address = spawn_mock(None).await;
    let helper = elastic(&address);
    let text = helper.request("GET", "/_cat/indices", None, None).await.unwrap();
    assert_eq!(text, Value::String("green open logs 1 0\n".to_string()));

    let empty = helper.request("HEAD", "/empty", None, None).await.unwrap();
    assert_eq!(empty, Value::Null);
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let address = spawn_mock(None).await;
    let err = elastic(&address)
        .search("missing-index", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolsError::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_per_call_timeout() {
    let address = spawn_mock(None).await;
    let err = elastic(&address)
        .request("GET", "/slow", None, Some(Duration::from_millis(200)))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolsError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_cluster_is_transport_error() {
    let err = elastic(UNREACHABLE).cluster_health().await.unwrap_err();
    assert!(matches!(err, ToolsError::Transport(_)));
}

#[tokio::test]
async fn test_invalid_method_rejected_before_sending() {
    let err = elastic(UNREACHABLE)
        .request("NOT A VERB", "/", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ToolsError::Api(_)));
}
