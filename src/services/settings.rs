use crate::client::SonarClient;
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::SettingKey;
use crate::validation::{required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/settings`
pub struct SettingsApi<'a> {
    client: &'a SonarClient,
}

impl<'a> SettingsApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Definitions of the settings which can be set, globally or on `component`.
    pub async fn list_definitions(
        &self,
        options: Option<&ListDefinitionsOptions>,
    ) -> Result<ListDefinitionsResponse, SonarError> {
        self.client
            .json(Method::GET, "api/settings/list_definitions", options)
            .await
    }

    /// Set the value of a setting.
    pub async fn set(&self, options: &SetOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/settings/set", Some(options))
            .await?;
        Ok(())
    }

    /// Remove settings so that their default values apply again.
    pub async fn reset(&self, options: &ResetOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/settings/reset", Some(options))
            .await?;
        Ok(())
    }

    pub async fn values(
        &self,
        options: Option<&ValuesOptions>,
    ) -> Result<ValuesResponse, SonarError> {
        self.client
            .json(Method::GET, "api/settings/values", options)
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ListDefinitionsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Validate for ListDefinitionsOptions {}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Values of a multi-value setting. Sent as a JSON array since
    /// values may themselves contain commas.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Each element is the JSON encoding of one field set,
    /// e.g. `{"key":"a","value":"b"}`. Sent as a JSON array.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Validate for SetOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("key", &self.key)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ResetOptions {
    #[serde(with = "comma_separated")]
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Validate for ResetOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("keys", &self.keys)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ValuesOptions {
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Validate for ValuesOptions {}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub key: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub key: SettingKey,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub setting_type: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub default_value: Option<String>,
    #[serde(default)]
    pub multi_values: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ListDefinitionsResponse {
    pub definitions: Vec<Definition>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: SettingKey,
    pub value: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub field_values: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub inherited: bool,
    pub parent_value: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuesResponse {
    pub settings: Vec<Setting>,
    #[serde(default)]
    pub set_secured_settings: Vec<String>,
}
