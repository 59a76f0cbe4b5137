//! The `elasticsearch_rest` tool: one REST call against a configured cluster.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::api_error;
use crate::credentials::{resolve_cluster, Credentials, ResolvedCluster};
use crate::elasticsearch::ElasticsearchHelper;
use crate::error::{CredentialError, Result};

pub const TOOL_NAME: &str = "elasticsearch_rest";

pub const SUCCESS: &str = "success";
pub const ERROR_MESSAGE: &str = "error_message";
pub const RESULT_OBJECT: &str = "result_object";
pub const RESULT_ARRAY: &str = "result_array";
pub const RESULT_STRING: &str = "result_string";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ToolParameters {
    pub cluster_name: Option<String>,
    pub cluster_address: Option<String>,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub body: Option<Value>,
    /// Seconds
    #[serde(default)]
    pub timeout: Option<f64>,
}

impl ToolParameters {
    fn timeout(&self) -> Result<Option<Duration>> {
        match self.timeout {
            None => Ok(None),
            Some(secs) if secs.is_finite() && secs > 0.0 => Duration::try_from_secs_f64(secs)
                .map(Some)
                .map_err(|e| api_error!("invalid timeout {}: {}", secs, e)),
            Some(secs) => Err(api_error!(
                "timeout must be a positive number of seconds, got {}",
                secs
            )),
        }
    }
}

/// One output variable handed back to the plugin host.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ToolMessage {
    pub variable_name: String,
    pub variable_value: Value,
}

impl ToolMessage {
    pub fn new(variable_name: &str, variable_value: impl Into<Value>) -> Self {
        Self {
            variable_name: variable_name.to_string(),
            variable_value: variable_value.into(),
        }
    }
}

/// Result of an invocation, before it is flattened into messages.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolOutput {
    Failure(String),
    Object(Value),
    Array(Value),
    Text(String),
}

impl ToolOutput {
    pub fn from_response(value: Value) -> Self {
        match value {
            Value::Object(_) => ToolOutput::Object(value),
            Value::Array(_) => ToolOutput::Array(value),
            Value::Null => ToolOutput::Text(String::new()),
            Value::String(text) => ToolOutput::Text(text),
            other => ToolOutput::Text(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ToolOutput::Failure(_))
    }

    pub fn into_messages(self) -> Vec<ToolMessage> {
        let success = ToolMessage::new(SUCCESS, self.is_success());
        let payload = match self {
            ToolOutput::Failure(message) => ToolMessage::new(ERROR_MESSAGE, message),
            ToolOutput::Object(value) => ToolMessage::new(RESULT_OBJECT, value),
            ToolOutput::Array(value) => ToolMessage::new(RESULT_ARRAY, value),
            ToolOutput::Text(text) => ToolMessage::new(RESULT_STRING, text),
        };
        vec![success, payload]
    }
}

pub struct ElasticsearchRestTool {
    credentials: Credentials,
}

impl ElasticsearchRestTool {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Run the tool. Every failure is reported as output, never raised.
    #[instrument(
        skip(self, params),
        fields(method = %params.method, endpoint = %params.endpoint)
    )]
    pub async fn invoke(&self, params: &ToolParameters) -> Vec<ToolMessage> {
        let output = match self.call(params).await {
            Ok(value) => ToolOutput::from_response(value),
            Err(err) => {
                warn!(error = %err, "Tool invocation failed");
                ToolOutput::Failure(err.to_string())
            }
        };
        output.into_messages()
    }

    async fn call(&self, params: &ToolParameters) -> Result<Value> {
        if params.endpoint.trim().is_empty() {
            return Err(api_error!("endpoint is required"));
        }
        if params.method.trim().is_empty() {
            return Err(api_error!("method is required"));
        }
        let cluster = self.resolve(params)?;
        let timeout = params.timeout()?;
        let helper = ElasticsearchHelper::for_cluster(&cluster)?;

        info!(cluster = %cluster.name, address = %cluster.address, "Calling Elasticsearch");
        helper
            .request(&params.method, &params.endpoint, params.body.as_ref(), timeout)
            .await
    }

    fn resolve(&self, params: &ToolParameters) -> Result<ResolvedCluster> {
        let (cluster_map, auth_list) = self.credentials.parse()?;
        let cluster_name = match (&params.cluster_name, &params.cluster_address) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(address)) if !address.is_empty() => cluster_map
                .name_for_address(address)
                .map(str::to_string)
                .ok_or_else(|| CredentialError::UnknownCluster(address.clone()))?,
            _ => return Err(api_error!("either cluster_name or cluster_address is required")),
        };
        resolve_cluster(&cluster_map, &auth_list, &cluster_name)
    }
}
