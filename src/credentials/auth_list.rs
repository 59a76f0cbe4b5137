//! The `auth_list` credential field.
//!
//! The text is a JSON array of objects mapping a cluster name to
//! `"username:password"`, or to `""` for a cluster without security:
//!
//! ```text
//! [{"prod": "elastic:changeme"}, {"dev": ""}]
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CredentialError, Result};

pub const FIELD_NAME: &str = "auth_list";

/// Credentials for one cluster. Both parts are `None` for anonymous access.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthEntry {
    pub identifier: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

// Keeps passwords out of logs
impl fmt::Debug for AuthEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEntry")
            .field("identifier", &self.identifier)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AuthEntry {
    pub fn anonymous(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            username: None,
            password: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }

    /// Build an entry from one `identifier: value` pair of the auth list.
    fn from_pair(identifier: &str, value: &Value) -> Result<Self> {
        let auth = match value {
            Value::Null => return Ok(Self::anonymous(identifier)),
            Value::String(auth) if auth.is_empty() => return Ok(Self::anonymous(identifier)),
            Value::String(auth) => auth,
            other => return Err(CredentialError::AuthFormat(other.to_string()).into()),
        };

        let parts: Vec<&str> = auth.split(':').collect();
        match parts.as_slice() {
            [username, password] => Ok(Self {
                identifier: identifier.to_string(),
                username: Some(username.to_string()),
                password: Some(password.to_string()),
            }),
            _ => Err(CredentialError::AuthFormat(auth.clone()).into()),
        }
    }

    /// The value this entry is written as in the auth list.
    fn auth_value(&self) -> String {
        match (&self.username, &self.password) {
            (None, None) => String::new(),
            (username, password) => format!(
                "{}:{}",
                username.as_deref().unwrap_or_default(),
                password.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Ordered list of auth entries. Lookups scan from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthList {
    entries: Vec<AuthEntry>,
}

impl AuthList {
    pub fn new(entries: Vec<AuthEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AuthEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose identifier matches, if any.
    pub fn find(&self, identifier: &str) -> Option<&AuthEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    /// Serialize back to the `auth_list` text format.
    pub fn to_json(&self) -> String {
        let items: Vec<Value> = self
            .entries
            .iter()
            .map(|entry| {
                let mut object = Map::new();
                object.insert(entry.identifier.clone(), Value::String(entry.auth_value()));
                Value::Object(object)
            })
            .collect();
        Value::Array(items).to_string()
    }
}

/// Parse `auth_list` text.
///
/// Blank text means no credentials are configured. Any other text must be a
/// JSON array; elements that are not objects are ignored, and every key of
/// every object becomes one entry in document order. The first bad auth
/// value aborts the parse.
pub fn parse_auth_list(auth_list_text: &str) -> Result<AuthList> {
    if auth_list_text.trim().is_empty() {
        return Ok(AuthList::default());
    }

    let raw: Value =
        serde_json::from_str(auth_list_text).map_err(|e| CredentialError::MalformedJson {
            field: FIELD_NAME,
            detail: e.to_string(),
        })?;
    let items = match raw {
        Value::Array(items) => items,
        other => {
            return Err(CredentialError::MalformedJson {
                field: FIELD_NAME,
                detail: format!("found {}", json_kind(&other)),
            }
            .into())
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items.iter().filter_map(Value::as_object) {
        for (identifier, value) in item {
            entries.push(AuthEntry::from_pair(identifier, value)?);
        }
    }
    Ok(AuthList::new(entries))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
