//! Information needed to render the SonarQube web interface.

use crate::client::{SonarClient, NO_OPTIONS};
use crate::errors::SonarError;
use crate::types::ComponentKey;
use crate::validation::Validate;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/navigation`
pub struct NavigationApi<'a> {
    client: &'a SonarClient,
}

impl<'a> NavigationApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    pub async fn component(
        &self,
        options: Option<&ComponentOptions>,
    ) -> Result<ComponentNavigation, SonarError> {
        self.client
            .json(Method::GET, "api/navigation/component", options)
            .await
    }

    pub async fn global(&self) -> Result<GlobalNavigation, SonarError> {
        self.client
            .json(Method::GET, "api/navigation/global", NO_OPTIONS)
            .await
    }

    pub async fn settings(&self) -> Result<SettingsNavigation, SonarError> {
        self.client
            .json(Method::GET, "api/navigation/settings", NO_OPTIONS)
            .await
    }

    pub async fn marketplace(&self) -> Result<Marketplace, SonarError> {
        self.client
            .json(Method::GET, "api/navigation/marketplace", NO_OPTIONS)
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<String>,
}

impl Validate for ComponentOptions {}

#[derive(Deserialize, Debug, Clone)]
pub struct Extension {
    pub key: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QualityGate {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QualityProfile {
    pub key: String,
    pub name: String,
    pub language: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Breadcrumb {
    pub key: ComponentKey,
    pub name: String,
    pub qualifier: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNavigation {
    pub key: ComponentKey,
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub analysis_date: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    pub quality_gate: Option<QualityGate>,
    #[serde(default)]
    pub quality_profiles: Vec<QualityProfile>,
    #[serde(default)]
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Permission flags, e.g. `showSettings`.
    #[serde(default)]
    pub configuration: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GlobalNavigation {
    #[serde(default)]
    pub global_pages: Vec<Extension>,
    pub version: Option<String>,
    pub edition: Option<String>,
    pub production_database: Option<bool>,
    #[serde(default)]
    pub can_admin: bool,
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Public server settings, e.g. `sonar.lf.logoUrl`.
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SettingsNavigation {
    #[serde(default)]
    pub show_update_center: bool,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Marketplace {
    pub server_id: String,
    pub ncloc: u64,
}
