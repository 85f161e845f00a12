//! Logging configuration
//!
//! Human-readable logs go to stderr so they never mix with command output.
//! A JSON file layer with daily rotation can be added on top.

use anyhow::Result;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,        // used when RUST_LOG is unset
    pub dir: Option<PathBuf>, // directory for rancher-query.log.<date>
}

impl LoggingConfig {
    /// Install the global subscriber. Hold the returned guard for the life of
    /// the process or buffered file output is lost.
    pub fn init(&self) -> Result<Option<WorkerGuard>> {
        let env_filter =
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))?;

        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr);

        let mut guard = None;
        let file_layer = self.dir.as_ref().map(|dir| {
            let (writer, file_guard) = non_blocking(rolling::daily(dir, "rancher-query.log"));
            guard = Some(file_guard);

            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_writer(writer)
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        tracing::debug!("Logging initialized - level: {}", self.level);

        Ok(guard)
    }
}
