//! A tiny stand-in for an Elasticsearch node, served by axum on a local port.
#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

/// `Authorization` header for elastic:password
pub const ELASTIC_BASIC_AUTH: &str = "Basic ZWxhc3RpYzpwYXNzd29yZA==";

/// An address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Start a mock cluster. When `required_auth` is set, requests without that
/// exact `Authorization` header get a 401.
pub async fn spawn_mock(required_auth: Option<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock listener");
    let addr = listener.local_addr().expect("mock address");
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: String| async move {
            handle(required_auth, method, uri, headers, body).await
        },
    );
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .expect("mock server")
            .serve(app.into_make_service())
            .await
            .expect("mock server exited");
    });
    format!("http://{}", addr)
}

async fn handle(
    required_auth: Option<&'static str>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Some(required) = required_auth {
        if authorization.as_deref() != Some(required) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"type": "security_exception"}, "status": 401})),
            )
                .into_response();
        }
    }

    match uri.path() {
        "/_cluster/health" => {
            Json(json!({"cluster_name": "mock", "status": "green", "number_of_nodes": 1}))
                .into_response()
        }
        "/" => Json(json!({"cluster_name": "mock", "version": {"number": "8.11.0"}}))
            .into_response(),
        "/_cat/indices" => "green open logs 1 0\n".into_response(),
        "/_cat/count" => Json(json!([{"count": "42"}])).into_response(),
        "/empty" => StatusCode::OK.into_response(),
        "/missing-index/_search" => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"type": "index_not_found_exception"}, "status": 404})),
        )
            .into_response(),
        "/slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"slow": true})).into_response()
        }
        path => {
            let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            Json(json!({
                "method": method.as_str(),
                "path": path,
                "authorization": authorization,
                "content_type": headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok()),
                "accept": headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()),
                "body": body,
            }))
            .into_response()
        }
    }
}
