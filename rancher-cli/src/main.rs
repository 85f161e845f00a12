//! rancher-query
//!
//! Command-line interface for reading project metadata from a Rancher server

mod commands;
mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::config::ConfigCommands;
use rancher_client::{ClientConfig, RancherClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Rancher server URL (overrides the config file)
    #[arg(short, long, env = "RANCHER_URL")]
    server: Option<String>,

    /// API token (overrides the config file)
    #[arg(long, env = "RANCHER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Include Rancher-managed (cattle.io) annotations and labels
    #[arg(long)]
    all_metadata: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RANCHER_QUERY_LOG", default_value = "warn")]
    log_level: String,

    /// Also write JSON logs to a daily rotated file in this directory
    #[arg(long, env = "RANCHER_QUERY_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Query clusters
    Clusters {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Manage the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Print the number of projects
    Count,
    /// List projects
    List,
    /// List project annotations
    Annotations,
    /// List project labels
    Labels,
    /// List project resource quotas
    Quotas,
}

#[derive(Subcommand)]
enum ClusterCommands {
    /// List clusters
    List,
    /// Resolve a cluster ID (or project ID) to the cluster name
    Name { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let logging = logging::LoggingConfig {
        level: cli.log_level.clone(),
        dir: cli.log_dir.clone(),
    };
    // Keeps the file writer flushing until exit
    let _guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            output::print_error(&format!("Failed to initialize logging: {:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config { command } = &cli.command {
        return commands::config::handle_config_command(command, &config::Config::config_path()?);
    }

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring unreadable config file: {:#}", e);
            config::Config::default()
        }
    };

    let output_format =
        output::OutputFormat::from_str(cli.output.as_deref().unwrap_or(&config.default_output));

    let client_config = client_config(&cli, &config);

    match cli.command {
        Commands::Projects { command } => {
            let client = connect(client_config?)?;
            commands::projects::handle_project_command(command, &client, output_format).await?
        }
        Commands::Clusters { command } => {
            let client = connect(client_config?)?;
            commands::clusters::handle_cluster_command(command, &client, output_format).await?
        }
        // Handled before the lenient load above
        Commands::Config { .. } => {}
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn connect(client_config: ClientConfig) -> Result<RancherClient> {
    tracing::debug!(server = %client_config.url, "using rancher server");
    RancherClient::new(client_config).context("Failed to create Rancher client")
}

/// Merge flags and env vars over the config file
fn client_config(cli: &Cli, config: &config::Config) -> Result<ClientConfig> {
    let url = cli
        .server
        .clone()
        .or_else(|| config.server.clone())
        .context("No Rancher server configured. Pass --server, set RANCHER_URL or run 'rancher-query config set server <URL>'")?;

    Ok(ClientConfig {
        url,
        token: cli.token.clone().or_else(|| config.token.clone()),
        access_key: config.access_key.clone(),
        secret_key: config.secret_key.clone(),
        timeout: config.timeout(),
        insecure: cli.insecure || config.insecure,
        include_system_metadata: cli.all_metadata || config.include_system_metadata,
    })
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
