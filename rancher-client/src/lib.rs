//! Read-only Rancher management API client
//!
//! [`RancherClient`] enumerates the projects of a Rancher installation and
//! reshapes their annotations, labels and resource quotas into flat records.

pub mod client;
pub mod error;
pub mod metadata;

pub use client::{ClientConfig, RancherClient};
pub use error::{ClientError, Result};
pub use rancher_common::{
    Cluster, Project, ProjectAnnotation, ProjectLabel, ProjectResource, QuotaScope,
};
