//! Cluster queries

use crate::output::{self, OutputFormat};
use crate::ClusterCommands;
use anyhow::{Context, Result};
use rancher_client::RancherClient;
use rancher_common::Cluster;
use std::collections::HashMap;
use tabled::Tabled;

#[derive(Tabled)]
struct ClusterRow {
    id: String,
    name: String,
    provider: String,
    state: String,
    age: String,
}

impl From<Cluster> for ClusterRow {
    fn from(cluster: Cluster) -> Self {
        Self {
            id: cluster.id,
            name: cluster.name,
            provider: output::or_dash(cluster.provider.as_deref()),
            state: output::or_dash(cluster.state.as_deref()),
            age: cluster
                .created
                .map(|created| output::format_relative_time(created.timestamp()))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn handle_cluster_command(
    command: ClusterCommands,
    client: &RancherClient,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        ClusterCommands::List => {
            let clusters = client
                .list_clusters()
                .await
                .context("Failed to list clusters")?;
            output::print_list(clusters, output_format, ClusterRow::from)?;
        }

        ClusterCommands::Name { id } => {
            let name = client
                .cluster_id_to_name(&id)
                .await
                .with_context(|| format!("Failed to look up cluster '{}'", id))?;

            if name.is_empty() {
                output::print_warning(&format!("No cluster with ID '{}'", id));
            }

            if output_format == OutputFormat::Table {
                println!("{}", name);
            } else {
                let result = HashMap::from([("id", id.as_str()), ("name", name.as_str())]);
                output::print_single(&result, output_format)?;
            }
        }
    }

    Ok(())
}
