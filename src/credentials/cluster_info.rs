//! The `cluster_info` credential field: `[{"name": "http://host:9200"}, ...]`
use serde_json::Value;

use super::auth_list::json_kind;
use crate::error::{CredentialError, Result};

pub const FIELD_NAME: &str = "cluster_info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterEntry {
    pub name: String,
    pub address: String,
}

/// Cluster name to address, in configuration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterMap {
    clusters: Vec<ClusterEntry>,
}

impl ClusterMap {
    pub fn iter(&self) -> impl Iterator<Item = &ClusterEntry> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn address(&self, name: &str) -> Option<&str> {
        self.clusters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.address.as_str())
    }

    /// Reverse lookup; trailing slashes on either side are ignored.
    pub fn name_for_address(&self, address: &str) -> Option<&str> {
        let wanted = address.trim_end_matches('/');
        self.clusters
            .iter()
            .find(|c| c.address.trim_end_matches('/') == wanted)
            .map(|c| c.name.as_str())
    }

    fn insert(&mut self, name: &str, address: &str) -> Result<()> {
        if self.address(name).is_some() {
            return Err(CredentialError::AmbiguousCluster(name.to_string()).into());
        }
        self.clusters.push(ClusterEntry {
            name: name.to_string(),
            address: address.to_string(),
        });
        Ok(())
    }
}

/// Parse `cluster_info` text into a [`ClusterMap`].
pub fn parse_cluster_info(cluster_info_text: &str) -> Result<ClusterMap> {
    let raw: Value =
        serde_json::from_str(cluster_info_text).map_err(|e| CredentialError::MalformedJson {
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

    let mut cluster_map = ClusterMap::default();
    for (position, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| {
            CredentialError::ClusterInfoEntry(format!(
                "element {} is {}, expected {{\"name\": \"address\"}}",
                position,
                json_kind(item)
            ))
        })?;
        if object.len() != 1 {
            return Err(CredentialError::ClusterInfoEntry(format!(
                "element {} has {} keys, expected exactly one",
                position,
                object.len()
            ))
            .into());
        }
        for (name, address) in object {
            let address = address.as_str().ok_or_else(|| {
                CredentialError::ClusterInfoEntry(format!(
                    "address of cluster '{}' is {}, expected a string",
                    name,
                    json_kind(address)
                ))
            })?;
            cluster_map.insert(name, address)?;
        }
    }
    Ok(cluster_map)
}
