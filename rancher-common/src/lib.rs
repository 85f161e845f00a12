//! Common types shared between rancher-client and rancher-cli
//!
//! The wire types mirror the Rancher management API (`/v3`) and accept its
//! camelCase JSON. The record types are the flat per-project metadata rows
//! handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Resource name to quantity string (e.g. `pods -> "50"`, `limitsCpu -> "2000m"`)
pub type ResourceQuotaLimit = BTreeMap<String, String>;

/// Treat an explicit JSON `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List envelope returned by every `/v3` collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub data: Vec<T>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            resource_type: None,
        }
    }
}

/// Rancher project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "nullable")]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub resource_quota: Option<ProjectResourceQuota>,
    #[serde(default)]
    pub namespace_default_resource_quota: Option<NamespaceResourceQuota>,
}

/// Project-wide quota and what the project's namespaces currently reserve of it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResourceQuota {
    #[serde(default, deserialize_with = "nullable")]
    pub limit: ResourceQuotaLimit,
    #[serde(default, deserialize_with = "nullable")]
    pub used_limit: ResourceQuotaLimit,
}

/// Default quota applied to each namespace created in the project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceResourceQuota {
    #[serde(default, deserialize_with = "nullable")]
    pub limit: ResourceQuotaLimit,
}

/// Rancher-managed Kubernetes cluster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// One annotation of one project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectAnnotation {
    pub project_id: String,
    pub project_name: String,
    pub cluster_id: String,
    pub cluster_name: String,
    pub key: String,
    pub value: String,
}

/// One label of one project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectLabel {
    pub project_id: String,
    pub project_name: String,
    pub cluster_id: String,
    pub cluster_name: String,
    pub key: String,
    pub value: String,
}

/// Which quota a [`ProjectResource`] row was taken from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuotaScope {
    Project,
    NamespaceDefault,
}

impl std::fmt::Display for QuotaScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::NamespaceDefault => write!(f, "namespace-default"),
        }
    }
}

/// One quota'd resource of one project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectResource {
    pub project_id: String,
    pub project_name: String,
    pub cluster_id: String,
    pub cluster_name: String,
    pub scope: QuotaScope,
    pub resource: String,
    pub limit: String,
    /// Only reported for the project scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<String>,
}

/// Whether an annotation or label key belongs to Rancher itself
/// (`cattle.io` or any of its subdomains, e.g. `field.cattle.io/creatorId`)
pub fn is_system_key(key: &str) -> bool {
    let Some((prefix, _)) = key.split_once('/') else {
        return false;
    };
    prefix == "cattle.io" || prefix.ends_with(".cattle.io")
}

/// Cluster portion of a project ID (`c-abc12:p-xyz34` -> `c-abc12`)
pub fn cluster_part(id: &str) -> &str {
    match id.split_once(':') {
        Some((cluster, _)) => cluster,
        None => id,
    }
}
