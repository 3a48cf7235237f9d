use crate::client::{SonarClient, NO_OPTIONS};
use crate::constants::{PLUGIN_FIELDS, PLUGIN_TYPES};
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::PluginKey;
use crate::validation::{all_of, one_of_opt, required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/plugins`
pub struct PluginsApi<'a> {
    client: &'a SonarClient,
}

impl<'a> PluginsApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Plugins which can be installed from the update center.
    pub async fn available(&self) -> Result<AvailableResponse, SonarError> {
        self.client
            .json(Method::GET, "api/plugins/available", NO_OPTIONS)
            .await
    }

    pub async fn installed(
        &self,
        options: Option<&InstalledOptions>,
    ) -> Result<InstalledResponse, SonarError> {
        self.client
            .json(Method::GET, "api/plugins/installed", options)
            .await
    }

    /// Plugins waiting for a restart to be installed, updated or removed.
    pub async fn pending(&self) -> Result<PendingResponse, SonarError> {
        self.client
            .json(Method::GET, "api/plugins/pending", NO_OPTIONS)
            .await
    }

    pub async fn install(&self, options: &KeyOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/plugins/install", Some(options))
            .await?;
        Ok(())
    }

    pub async fn uninstall(&self, options: &KeyOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/plugins/uninstall", Some(options))
            .await?;
        Ok(())
    }

    pub async fn update(&self, options: &KeyOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/plugins/update", Some(options))
            .await?;
        Ok(())
    }

    /// Cancel every pending install, update and uninstall.
    pub async fn cancel_all(&self) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/plugins/cancel_all", NO_OPTIONS)
            .await?;
        Ok(())
    }

    /// Installed plugins for which a newer release is available.
    pub async fn updates(&self) -> Result<UpdatesResponse, SonarError> {
        self.client
            .json(Method::GET, "api/plugins/updates", NO_OPTIONS)
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct InstalledOptions {
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub f: Vec<String>,
    /// `BUNDLED` or `EXTERNAL`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub plugin_type: Option<String>,
}

impl Validate for InstalledOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        all_of("f", &self.f, &PLUGIN_FIELDS)?;
        one_of_opt("type", self.plugin_type.as_deref(), &PLUGIN_TYPES)
    }
}

/// Identifies a plugin for install, uninstall and update.
#[derive(Serialize, Debug, Clone, Default)]
pub struct KeyOptions {
    pub key: String,
}

impl KeyOptions {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Validate for KeyOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("key", &self.key)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub key: PluginKey,
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
    pub license: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
    pub homepage_url: Option<String>,
    pub issue_tracker_url: Option<String>,
    pub implementation_build: Option<String>,
    pub filename: Option<String>,
    pub hash: Option<String>,
    pub sonar_lint_supported: Option<bool>,
    pub edition_bundled: Option<bool>,
    pub updated_at: Option<i64>,
    #[serde(rename = "type")]
    pub plugin_type: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub version: String,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "changeLogUrl")]
    pub change_log_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Requirement {
    pub key: PluginKey,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Update {
    pub status: String,
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailablePlugin {
    pub key: PluginKey,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub terms_and_conditions_url: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
    pub edition_bundled: Option<bool>,
    pub release: Option<Release>,
    pub update: Option<Update>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailableResponse {
    pub plugins: Vec<AvailablePlugin>,
    #[serde(default)]
    pub update_center_refresh: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InstalledResponse {
    pub plugins: Vec<Plugin>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PendingResponse {
    #[serde(default)]
    pub installing: Vec<Plugin>,
    #[serde(default)]
    pub removing: Vec<Plugin>,
    #[serde(default)]
    pub updating: Vec<Plugin>,
}

impl PendingResponse {
    pub fn is_empty(&self) -> bool {
        self.installing.is_empty() && self.removing.is_empty() && self.updating.is_empty()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PluginUpdate {
    pub status: String,
    pub release: Option<Release>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdatablePlugin {
    pub key: PluginKey,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub updates: Vec<PluginUpdate>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdatesResponse {
    pub plugins: Vec<UpdatablePlugin>,
    #[serde(default)]
    pub update_center_refresh: Option<String>,
}
