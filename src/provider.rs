//! Provider-level credential validation.
//!
//! Every configured cluster is health-checked, one after another, with the
//! credentials resolved for it. Failures are collected so that a single
//! report names every broken cluster.
use tracing::{info, instrument, warn};

use crate::credentials::{resolve_cluster, AuthList, ClusterMap, Credentials};
use crate::elasticsearch::ElasticsearchHelper;
use crate::error::{ClusterFailure, CredentialError, Result};

/// Health-check each cluster of `cluster_map`. An empty result means all passed.
pub async fn check_clusters(cluster_map: &ClusterMap, auth_list: &AuthList) -> Vec<ClusterFailure> {
    let mut failures = Vec::new();

    for entry in cluster_map.iter() {
        let helper = resolve_cluster(cluster_map, auth_list, &entry.name)
            .and_then(|cluster| ElasticsearchHelper::for_cluster(&cluster));
        let helper = match helper {
            Ok(helper) => helper,
            Err(err) => {
                warn!(cluster = %entry.name, error = %err, "Could not prepare cluster");
                failures.push(ClusterFailure {
                    cluster_name: entry.name.clone(),
                    cluster_address: None,
                    error: err.to_string(),
                });
                continue;
            }
        };

        match helper.cluster_health().await {
            Ok(health) => {
                info!(
                    cluster = %entry.name,
                    address = %entry.address,
                    status = %health.get("status").and_then(|s| s.as_str()).unwrap_or("unknown"),
                    "Cluster health check passed"
                );
            }
            Err(err) => {
                warn!(
                    cluster = %entry.name,
                    address = %entry.address,
                    error = %err,
                    "Cluster health check failed"
                );
                failures.push(ClusterFailure {
                    cluster_name: entry.name.clone(),
                    cluster_address: Some(entry.address.clone()),
                    error: err.to_string(),
                });
            }
        }
    }

    failures
}

/// Validate provider credentials, reporting every failing cluster at once.
#[instrument(skip(credentials), level = "info")]
pub async fn validate_credentials(credentials: &Credentials) -> Result<()> {
    let (cluster_map, auth_list) = credentials.parse()?;
    info!(
        clusters = cluster_map.len(),
        auth_entries = auth_list.len(),
        "Validating cluster credentials"
    );

    let failures = check_clusters(&cluster_map, &auth_list).await;
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CredentialError::ClusterValidation(failures).into())
    }
}
