//! Rancher management API client

use crate::error::{ClientError, Result};
use crate::metadata::{self, ClusterNames};
use rancher_common::{
    cluster_part, Cluster, Collection, Project, ProjectAnnotation, ProjectLabel, ProjectResource,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Ask the server for everything in one response
const LIST_ALL: [(&str, &str); 1] = [("limit", "-1")];

/// Connection settings for a [`RancherClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL, with or without the trailing `/v3`
    pub url: String,
    /// API token (`token-xxxxx:secret`), sent as a bearer token
    pub token: Option<String>,
    /// Access/secret key pair, sent as basic auth when no token is set
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout: Duration,
    /// Accept self-signed certificates
    pub insecure: bool,
    /// Keep `cattle.io` annotation and label keys in the records
    pub include_system_metadata: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost".to_string(),
            token: None,
            access_key: None,
            secret_key: None,
            timeout: Duration::from_secs(30),
            insecure: false,
            include_system_metadata: false,
        }
    }
}

impl ClientConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Read-only Rancher API client
///
/// Every query hits the server; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RancherClient {
    client: reqwest::Client,
    config: ClientConfig,
    base_url: String,
}

impl RancherClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .default_headers(Self::headers(&config)?)
            .build()?;

        if config.insecure {
            warn!("TLS certificate verification disabled for {}", base_url);
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL of the server, without `/v3`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build headers for requests
    fn headers(config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidConfig("token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// GET request
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);

        if self.config.token.is_none() {
            if let Some(access_key) = &self.config.access_key {
                request = request.basic_auth(access_key, self.config.secret_key.as_ref());
            }
        }

        let response = request.send().await?;
        debug!(path, status = response.status().as_u16(), "rancher api request");

        self.handle_response(response).await
    }

    /// Handle API response
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(ClientError::AuthFailed)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound(response.url().path().to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// All projects visible to the configured credentials
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Collection<Project> = self.get("/v3/projects", &LIST_ALL).await?;
        Ok(projects.data)
    }

    /// All clusters visible to the configured credentials
    pub async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        let clusters: Collection<Cluster> = self.get("/v3/clusters", &LIST_ALL).await?;
        Ok(clusters.data)
    }

    /// Cluster ID to display name, from a single cluster listing
    pub async fn cluster_names(&self) -> Result<ClusterNames> {
        Ok(self
            .list_clusters()
            .await?
            .into_iter()
            .map(|cluster| (cluster.id, cluster.name))
            .collect())
    }

    pub async fn number_of_projects(&self) -> Result<usize> {
        Ok(self.list_projects().await?.len())
    }

    pub async fn project_annotations(&self) -> Result<Vec<ProjectAnnotation>> {
        let (projects, names) = self.projects_with_cluster_names().await?;
        Ok(metadata::annotations(
            &projects,
            &names,
            self.config.include_system_metadata,
        ))
    }

    pub async fn project_labels(&self) -> Result<Vec<ProjectLabel>> {
        let (projects, names) = self.projects_with_cluster_names().await?;
        Ok(metadata::labels(
            &projects,
            &names,
            self.config.include_system_metadata,
        ))
    }

    pub async fn project_resource_quota(&self) -> Result<Vec<ProjectResource>> {
        let (projects, names) = self.projects_with_cluster_names().await?;
        Ok(metadata::resources(&projects, &names))
    }

    /// Display name of a cluster.
    ///
    /// Accepts a cluster ID or a project ID (`c-xxxxx:p-yyyyy`). Returns an
    /// empty string for an empty or unknown ID; only transport and API
    /// failures are errors.
    pub async fn cluster_id_to_name(&self, id: &str) -> Result<String> {
        let id = cluster_part(id.trim());
        if id.is_empty() {
            return Ok(String::new());
        }

        let cluster = self
            .list_clusters()
            .await?
            .into_iter()
            .find(|cluster| cluster.id == id);

        match cluster {
            Some(cluster) => Ok(cluster.name),
            None => {
                debug!(cluster_id = id, "no cluster with this id");
                Ok(String::new())
            }
        }
    }

    async fn projects_with_cluster_names(&self) -> Result<(Vec<Project>, ClusterNames)> {
        let projects = self.list_projects().await?;
        if projects.is_empty() {
            return Ok((projects, ClusterNames::new()));
        }
        let names = self.cluster_names().await?;
        Ok((projects, names))
    }
}

/// Strip trailing `/` and `/v3` so paths can be appended as `/v3/...`
fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    let url = url.strip_suffix("/v3").unwrap_or(url).trim_end_matches('/');

    if url.is_empty() {
        return Err(ClientError::InvalidConfig("server URL is empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidConfig(format!(
            "server URL must start with http:// or https://: {}",
            url
        )));
    }

    Ok(url.to_string())
}
