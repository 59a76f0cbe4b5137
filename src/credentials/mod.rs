//! Provider credentials: parsing the configured fields and resolving a
//! cluster to its address and auth.
pub mod auth_list;
pub mod cluster_info;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use auth_list::{parse_auth_list, AuthEntry, AuthList};
pub use cluster_info::{parse_cluster_info, ClusterEntry, ClusterMap};

use crate::error::{CredentialError, Result};

/// Credential fields as delivered by the plugin host.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct Credentials {
    pub auth_list: Option<String>,
    pub cluster_info: Option<String>,
}

// auth_list carries passwords
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_list", &self.auth_list.as_ref().map(|_| "***"))
            .field("cluster_info", &self.cluster_info)
            .finish()
    }
}

impl Credentials {
    pub fn new(auth_list: impl Into<String>, cluster_info: impl Into<String>) -> Self {
        Self {
            auth_list: Some(auth_list.into()),
            cluster_info: Some(cluster_info.into()),
        }
    }

    pub fn auth_list_text(&self) -> Result<&str> {
        self.auth_list
            .as_deref()
            .ok_or_else(|| CredentialError::MissingField(auth_list::FIELD_NAME).into())
    }

    pub fn cluster_info_text(&self) -> Result<&str> {
        self.cluster_info
            .as_deref()
            .ok_or_else(|| CredentialError::MissingField(cluster_info::FIELD_NAME).into())
    }

    /// Parse both fields.
    pub fn parse(&self) -> Result<(ClusterMap, AuthList)> {
        let cluster_map = parse_cluster_info(self.cluster_info_text()?)?;
        let auth_list = parse_auth_list(self.auth_list_text()?)?;
        Ok((cluster_map, auth_list))
    }
}

/// A cluster ready to be called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCluster {
    pub name: String,
    pub address: String,
    pub auth: AuthEntry,
}

/// Credentials for `cluster_name`, or anonymous access when none are listed.
pub fn get_auth_for_cluster(auth_list: &AuthList, cluster_name: &str) -> AuthEntry {
    auth_list
        .find(cluster_name)
        .cloned()
        .unwrap_or_else(|| AuthEntry::anonymous(cluster_name))
}

pub fn resolve_cluster(
    cluster_map: &ClusterMap,
    auth_list: &AuthList,
    cluster_name: &str,
) -> Result<ResolvedCluster> {
    let address = cluster_map
        .address(cluster_name)
        .ok_or_else(|| CredentialError::UnknownCluster(cluster_name.to_string()))?;
    Ok(ResolvedCluster {
        name: cluster_name.to_string(),
        address: address.to_string(),
        auth: get_auth_for_cluster(auth_list, cluster_name),
    })
}
