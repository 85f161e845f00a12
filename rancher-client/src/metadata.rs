//! Project metadata shaping
//!
//! Turns API projects into flat annotation, label and quota records. Nothing
//! here talks to the network.

use rancher_common::{
    is_system_key, Project, ProjectAnnotation, ProjectLabel, ProjectResource, QuotaScope,
};
use std::collections::{BTreeMap, HashMap};

/// Cluster ID to display name
pub type ClusterNames = HashMap<String, String>;

fn cluster_name(names: &ClusterNames, cluster_id: &str) -> String {
    names.get(cluster_id).cloned().unwrap_or_default()
}

fn visible(
    map: &BTreeMap<String, String>,
    include_system: bool,
) -> impl Iterator<Item = (&String, &String)> {
    map.iter()
        .filter(move |(key, _)| include_system || !is_system_key(key))
}

/// Annotation records, in project order then key order
pub fn annotations(
    projects: &[Project],
    names: &ClusterNames,
    include_system: bool,
) -> Vec<ProjectAnnotation> {
    let mut records = Vec::new();
    for project in projects {
        let cluster = cluster_name(names, &project.cluster_id);
        for (key, value) in visible(&project.annotations, include_system) {
            records.push(ProjectAnnotation {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                cluster_id: project.cluster_id.clone(),
                cluster_name: cluster.clone(),
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    records
}

/// Label records, in project order then key order
pub fn labels(
    projects: &[Project],
    names: &ClusterNames,
    include_system: bool,
) -> Vec<ProjectLabel> {
    let mut records = Vec::new();
    for project in projects {
        let cluster = cluster_name(names, &project.cluster_id);
        for (key, value) in visible(&project.labels, include_system) {
            records.push(ProjectLabel {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                cluster_id: project.cluster_id.clone(),
                cluster_name: cluster.clone(),
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    records
}

/// Quota records. Per project, the project-wide quota comes before the
/// namespace default quota.
pub fn resources(projects: &[Project], names: &ClusterNames) -> Vec<ProjectResource> {
    let mut records = Vec::new();
    for project in projects {
        let cluster = cluster_name(names, &project.cluster_id);
        let record = |scope, resource: &String, limit: &String, used: Option<String>| {
            ProjectResource {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                cluster_id: project.cluster_id.clone(),
                cluster_name: cluster.clone(),
                scope,
                resource: resource.clone(),
                limit: limit.clone(),
                used,
            }
        };

        if let Some(quota) = &project.resource_quota {
            for (resource, limit) in &quota.limit {
                let used = quota.used_limit.get(resource).cloned();
                records.push(record(QuotaScope::Project, resource, limit, used));
            }
        }
        if let Some(quota) = &project.namespace_default_resource_quota {
            for (resource, limit) in &quota.limit {
                records.push(record(QuotaScope::NamespaceDefault, resource, limit, None));
            }
        }
    }
    records
}
