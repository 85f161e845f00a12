//! Project queries

use crate::output::{self, OutputFormat};
use crate::ProjectCommands;
use anyhow::{Context, Result};
use rancher_client::RancherClient;
use rancher_common::{Project, ProjectAnnotation, ProjectLabel, ProjectResource};
use serde::Serialize;
use std::collections::HashMap;
use tabled::Tabled;

/// Longest annotation or label value shown in a table cell
const MAX_VALUE_WIDTH: usize = 60;

#[derive(Tabled)]
struct ProjectRow {
    id: String,
    name: String,
    cluster: String,
    state: String,
    age: String,
}

/// Project plus its resolved cluster name, for JSON/YAML output
#[derive(Serialize)]
struct ProjectSummary {
    #[serde(flatten)]
    project: Project,
    cluster_name: String,
}

impl From<ProjectSummary> for ProjectRow {
    fn from(summary: ProjectSummary) -> Self {
        let project = summary.project;
        Self {
            id: project.id,
            name: project.name,
            cluster: output::or_dash(Some(&summary.cluster_name)),
            state: output::or_dash(project.state.as_deref()),
            age: project
                .created
                .map(|created| output::format_relative_time(created.timestamp()))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
struct MetadataRow {
    project: String,
    cluster: String,
    key: String,
    value: String,
}

impl From<ProjectAnnotation> for MetadataRow {
    fn from(annotation: ProjectAnnotation) -> Self {
        Self {
            project: annotation.project_name,
            cluster: output::or_dash(Some(&annotation.cluster_name)),
            key: annotation.key,
            value: output::truncate(&annotation.value, MAX_VALUE_WIDTH),
        }
    }
}

impl From<ProjectLabel> for MetadataRow {
    fn from(label: ProjectLabel) -> Self {
        Self {
            project: label.project_name,
            cluster: output::or_dash(Some(&label.cluster_name)),
            key: label.key,
            value: output::truncate(&label.value, MAX_VALUE_WIDTH),
        }
    }
}

#[derive(Tabled)]
struct QuotaRow {
    project: String,
    cluster: String,
    scope: String,
    resource: String,
    limit: String,
    used: String,
}

impl From<ProjectResource> for QuotaRow {
    fn from(resource: ProjectResource) -> Self {
        Self {
            project: resource.project_name,
            cluster: output::or_dash(Some(&resource.cluster_name)),
            scope: resource.scope.to_string(),
            resource: resource.resource,
            limit: resource.limit,
            used: output::or_dash(resource.used.as_deref()),
        }
    }
}

pub async fn handle_project_command(
    command: ProjectCommands,
    client: &RancherClient,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        ProjectCommands::Count => {
            let count = client
                .number_of_projects()
                .await
                .context("Failed to count projects")?;

            if output_format == OutputFormat::Table {
                println!("{}", count);
            } else {
                output::print_single(&HashMap::from([("projects", count)]), output_format)?;
            }
        }

        ProjectCommands::List => {
            let projects = client
                .list_projects()
                .await
                .context("Failed to list projects")?;
            let names = if projects.is_empty() {
                HashMap::new()
            } else {
                client
                    .cluster_names()
                    .await
                    .context("Failed to list clusters")?
            };

            let summaries: Vec<ProjectSummary> = projects
                .into_iter()
                .map(|project| ProjectSummary {
                    cluster_name: names.get(&project.cluster_id).cloned().unwrap_or_default(),
                    project,
                })
                .collect();

            output::print_list(summaries, output_format, ProjectRow::from)?;
        }

        ProjectCommands::Annotations => {
            let annotations = client
                .project_annotations()
                .await
                .context("Failed to fetch project annotations")?;
            output::print_list(annotations, output_format, MetadataRow::from)?;
        }

        ProjectCommands::Labels => {
            let labels = client
                .project_labels()
                .await
                .context("Failed to fetch project labels")?;
            output::print_list(labels, output_format, MetadataRow::from)?;
        }

        ProjectCommands::Quotas => {
            let quotas = client
                .project_resource_quota()
                .await
                .context("Failed to fetch project resource quotas")?;
            output::print_list(quotas, output_format, QuotaRow::from)?;
        }
    }

    Ok(())
}
