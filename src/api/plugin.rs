//! Handlers the plugin host calls: credential validation and tool invocation.
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::provider;
use crate::tool::{ElasticsearchRestTool, ToolMessage, ToolParameters};

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub tool_parameters: ToolParameters,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InvokeResponse {
    pub messages: Vec<ToolMessage>,
}

#[instrument(skip_all, level = "info")]
pub async fn validate_credentials(
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    provider::validate_credentials(&request.credentials).await?;
    Ok(Json(ValidateResponse { valid: true }))
}

#[instrument(skip_all, level = "info")]
pub async fn invoke_tool(Json(request): Json<InvokeRequest>) -> Json<InvokeResponse> {
    let tool = ElasticsearchRestTool::new(request.credentials);
    let messages = tool.invoke(&request.tool_parameters).await;
    Json(InvokeResponse { messages })
}
