//! Server health, logs and lifecycle. Most endpoints require the
//! system administration permission or a monitoring passcode.

use crate::client::{Response, SonarClient, NO_OPTIONS};
use crate::constants::{LOG_LEVELS, LOG_NAMES};
use crate::errors::SonarError;
use crate::types::{DateTimeString, Health, MigrationState, SystemStatus};
use crate::validation::{one_of, one_of_opt, required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

/// `api/system`
pub struct SystemApi<'a> {
    client: &'a SonarClient,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> Result<HealthResponse, SonarError> {
        self.client
            .json(Method::GET, "api/system/health", NO_OPTIONS)
            .await
    }

    pub async fn status(&self) -> Result<StatusResponse, SonarError> {
        self.client
            .json(Method::GET, "api/system/status", NO_OPTIONS)
            .await
    }

    /// Answers `pong` if the web server is up.
    pub async fn ping(&self) -> Result<String, SonarError> {
        self.client
            .text(Method::GET, "api/system/ping", NO_OPTIONS)
            .await
    }

    /// Detailed system information. Its sections differ between editions
    /// and versions, so it is left untyped.
    pub async fn info(&self) -> Result<serde_json::Value, SonarError> {
        self.client
            .json(Method::GET, "api/system/info", NO_OPTIONS)
            .await
    }

    pub async fn logs(&self, options: Option<&LogsOptions>) -> Result<String, SonarError> {
        self.client
            .text(Method::GET, "api/system/logs", options)
            .await
    }

    /// Copy a server log into `writer`. Logs can be large.
    pub async fn logs_to<W>(
        &self,
        options: Option<&LogsOptions>,
        writer: &mut W,
    ) -> Result<Response, SonarError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.client.copy_to("api/system/logs", options, writer).await
    }

    /// Temporarily change the log level of all server processes.
    pub async fn change_log_level(&self, options: &ChangeLogLevelOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/system/change_log_level", Some(options))
            .await?;
        Ok(())
    }

    pub async fn restart(&self) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/system/restart", NO_OPTIONS)
            .await?;
        Ok(())
    }

    pub async fn db_migration_status(&self) -> Result<MigrationResponse, SonarError> {
        self.client
            .json(Method::GET, "api/system/db_migration_status", NO_OPTIONS)
            .await
    }

    /// Start the database migration, if one is required.
    pub async fn migrate_db(&self) -> Result<MigrationResponse, SonarError> {
        self.client
            .json(Method::POST, "api/system/migrate_db", NO_OPTIONS)
            .await
    }

    pub async fn upgrades(&self) -> Result<UpgradesResponse, SonarError> {
        self.client
            .json(Method::GET, "api/system/upgrades", NO_OPTIONS)
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct LogsOptions {
    /// One of `access`, `app`, `ce`, `deprecation`, `es`, `web`. The server defaults to `app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for LogsOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        one_of_opt("name", self.name.as_deref(), &LOG_NAMES)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ChangeLogLevelOptions {
    /// `TRACE`, `DEBUG` or `INFO`
    pub level: String,
}

impl Validate for ChangeLogLevelOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("level", &self.level)?;
        one_of("level", &self.level, &LOG_LEVELS)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Cause {
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub started_at: Option<DateTimeString>,
    pub health: Health,
    #[serde(default)]
    pub causes: Vec<Cause>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub health: Health,
    #[serde(default)]
    pub causes: Vec<Cause>,
    /// Only present on clusters.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatusResponse {
    pub id: String,
    pub version: String,
    pub status: SystemStatus,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResponse {
    pub state: MigrationState,
    pub message: Option<String>,
    pub started_at: Option<DateTimeString>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub version: String,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub change_log_url: Option<String>,
    pub download_url: Option<String>,
    #[serde(default)]
    pub plugins: serde_json::Value,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpgradesResponse {
    pub upgrades: Vec<Upgrade>,
    pub update_center_refresh: Option<String>,
}
