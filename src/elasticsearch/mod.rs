//! Thin HTTP wrapper around the Elasticsearch REST API.
//!
//! An [`ElasticsearchHelper`] is bound to one cluster address and one set of
//! credentials. Every call is a single request: no retries, no pooling
//! across helpers.
pub mod paths;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::credentials::{AuthEntry, ResolvedCluster};
use crate::error::{Result, ToolsError};
use crate::{api_error, config_error};

#[derive(Clone, Debug)]
pub struct ElasticsearchHelper {
    base_url: String,
    base: Url,
    username: Option<String>,
    password: Option<String>,
    client: Client,
}

impl ElasticsearchHelper {
    pub fn new(
        cluster_url: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        let base = Url::parse(cluster_url)
            .map_err(|e| config_error!("Invalid cluster address '{}': {}", cluster_url, e))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(config_error!(
                "Invalid cluster address '{}': scheme must be http or https",
                cluster_url
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| config_error!("failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: cluster_url.trim_end_matches('/').to_string(),
            base,
            username,
            password,
            client,
        })
    }

    pub fn with_auth(cluster_url: &str, auth: &AuthEntry) -> Result<Self> {
        Self::new(cluster_url, auth.username.clone(), auth.password.clone())
    }

    pub fn for_cluster(cluster: &ResolvedCluster) -> Result<Self> {
        Self::with_auth(&cluster.address, &cluster.auth)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Issue one request and decode the response.
    ///
    /// `endpoint` is used as written, query string included. Bodies that
    /// are not JSON come back as a JSON string, an empty body as `null`.
    /// Any non-2xx status is an error.
    #[instrument(skip(self, body), fields(cluster = %self.base_url), level = "debug")]
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&Value>,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let method = parse_method(method)?;
        let url = Url::parse(&paths::join(&self.base_url, endpoint))
            .map_err(|e| api_error!("Invalid endpoint '{}': {}", endpoint, e))?;
        self.send(method, url, body, timeout).await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let mut request = self.client.request(method, url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Elasticsearch request failed");
            return Err(ToolsError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        debug!(status = status.as_u16(), bytes = text.len(), "Elasticsearch responded");
        Ok(decode_body(text))
    }

    /// One call to a path built from segments, each percent-encoded.
    async fn call(&self, method: Method, segments: &[&str], body: Option<&Value>) -> Result<Value> {
        let url = paths::with_segments(&self.base, segments)?;
        self.send(method, url, body, None).await
    }

    pub async fn cluster_health(&self) -> Result<Value> {
        self.request("GET", paths::CLUSTER_HEALTH, None, None).await
    }

    pub async fn cluster_info(&self) -> Result<Value> {
        self.request("GET", paths::ROOT, None, None).await
    }

    pub async fn get_index_mapping(&self, index: &str) -> Result<Value> {
        self.call(Method::GET, &paths::index_mapping(index), None).await
    }

    pub async fn get_index_settings(&self, index: &str) -> Result<Value> {
        self.call(Method::GET, &paths::index_settings(index), None).await
    }

    pub async fn get_index_stats(&self, index: &str) -> Result<Value> {
        self.call(Method::GET, &paths::index_stats(index), None).await
    }

    pub async fn search(&self, index: &str, query: &Value) -> Result<Value> {
        self.call(Method::POST, &paths::search(index), Some(query)).await
    }

    pub async fn write_to_index(&self, index: &str, doc: &Value) -> Result<Value> {
        self.call(Method::POST, &paths::documents(index), Some(doc)).await
    }

    pub async fn get_document(&self, index: &str, doc_id: &str) -> Result<Value> {
        self.call(Method::GET, &paths::document(index, doc_id), None).await
    }

    pub async fn update_document(&self, index: &str, doc_id: &str, doc: &Value) -> Result<Value> {
        self.call(Method::PUT, &paths::document(index, doc_id), Some(doc)).await
    }

    pub async fn delete_from_index(&self, index: &str, doc_id: &str) -> Result<Value> {
        self.call(Method::DELETE, &paths::document(index, doc_id), None).await
    }
}

fn parse_method(method: &str) -> Result<Method> {
    let method = method.trim().to_ascii_uppercase();
    if method.is_empty() {
        return Err(api_error!("HTTP method is required"));
    }
    Method::from_bytes(method.as_bytes())
        .map_err(|_| api_error!("Invalid HTTP method: {}", method))
}

fn decode_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}
