use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Main error type for the Elasticsearch plugin
#[derive(Debug)]
pub enum ToolsError {
    /// Configuration or CLI argument errors
    Config(String),

    /// Problems with the provider credentials (auth_list / cluster_info)
    Credential(CredentialError),

    /// Invalid tool parameters
    Api(String),

    /// Elasticsearch answered with a non-2xx status
    Http { status: u16, body: String },

    /// Connection, DNS or timeout failures talking to a cluster
    Transport(String),

    /// JSON serialization/deserialization errors
    Serialization(serde_json::Error),
}

/// Credential validation errors
#[derive(Debug)]
pub enum CredentialError {
    /// Top-level credential text is not a JSON array
    MalformedJson { field: &'static str, detail: String },

    /// An auth value that is neither empty nor `username:password`
    AuthFormat(String),

    /// A cluster_info element that is not a single `{name: address}` pair
    ClusterInfoEntry(String),

    /// The same cluster name appears more than once in cluster_info
    AmbiguousCluster(String),

    /// No cluster_info entry for the requested cluster
    UnknownCluster(String),

    /// A required credential field was not supplied
    MissingField(&'static str),

    /// One or more clusters failed the health check during validation
    ClusterValidation(Vec<ClusterFailure>),
}

/// One cluster that did not pass provider validation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ClusterFailure {
    pub cluster_name: String,
    pub cluster_address: Option<String>,
    pub error: String,
}

impl fmt::Display for ToolsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolsError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ToolsError::Credential(err) => write!(f, "Credential error: {}", err),
            ToolsError::Api(msg) => write!(f, "Invalid request: {}", msg),
            ToolsError::Http { status, body } => {
                write!(f, "Elasticsearch returned HTTP {}: {}", status, body)
            }
            ToolsError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ToolsError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::MalformedJson { field, detail } => {
                write!(f, "{} must be a valid JSON array ({})", field, detail)
            }
            CredentialError::AuthFormat(value) => write!(
                f,
                "Invalid auth format: {}, expected 'username:password' or empty",
                value
            ),
            CredentialError::ClusterInfoEntry(msg) => {
                write!(f, "Invalid cluster_info entry: {}", msg)
            }
            CredentialError::AmbiguousCluster(name) => {
                write!(f, "Cluster '{}' is defined more than once in cluster_info", name)
            }
            CredentialError::UnknownCluster(name) => {
                write!(f, "Matching cluster not found: {}", name)
            }
            CredentialError::MissingField(field) => {
                write!(f, "Missing required credential information: {}", field)
            }
            CredentialError::ClusterValidation(failures) => {
                write!(f, "The following clusters failed validation:")?;
                for failure in failures {
                    write!(f, "\n{}", failure)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ClusterFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cluster Name: {}, Address: {}, Error: {}",
            self.cluster_name,
            self.cluster_address.as_deref().unwrap_or("Unknown"),
            self.error
        )
    }
}

impl std::error::Error for ToolsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolsError::Credential(err) => Some(err),
            ToolsError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for CredentialError {}

// Convenient type alias for Results using our error type
pub type Result<T> = std::result::Result<T, ToolsError>;

// Axum IntoResponse implementation for HTTP error responses
impl IntoResponse for ToolsError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = json!({
            "error": {
                "code": status_code.as_u16(),
                "message": self.to_string(),
                "type": self.error_type(),
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl ToolsError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ToolsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ToolsError::Credential(_) => StatusCode::BAD_REQUEST,
            ToolsError::Api(_) => StatusCode::BAD_REQUEST,
            ToolsError::Http { .. } => StatusCode::BAD_GATEWAY,
            ToolsError::Transport(_) => StatusCode::BAD_GATEWAY,
            ToolsError::Serialization(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ToolsError::Config(_) => "configuration_error",
            ToolsError::Credential(_) => "credential_error",
            ToolsError::Api(_) => "api_error",
            ToolsError::Http { .. } => "http_error",
            ToolsError::Transport(_) => "transport_error",
            ToolsError::Serialization(_) => "serialization_error",
        }
    }
}

// Conversions from common error types
impl From<CredentialError> for ToolsError {
    fn from(err: CredentialError) -> Self {
        ToolsError::Credential(err)
    }
}

impl From<serde_json::Error> for ToolsError {
    fn from(err: serde_json::Error) -> Self {
        ToolsError::Serialization(err)
    }
}

impl From<reqwest::Error> for ToolsError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ToolsError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ToolsError::Transport(err.to_string())
        }
    }
}

// Helper macros for common error construction patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::ToolsError::Config($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ToolsError::Config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! api_error {
    ($msg:expr) => {
        $crate::error::ToolsError::Api($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ToolsError::Api(format!($fmt, $($arg)*))
    };
}
