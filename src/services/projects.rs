use crate::client::SonarClient;
use crate::constants::{PROJECT_KEY_MAX, PROJECT_NAME_MAX, PROJECT_QUALIFIERS, PROJECT_VISIBILITIES};
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::{ComponentKey, DateTimeString, Paging, Visibility};
use crate::validation::{
    all_of, max_length, one_of, one_of_opt, required, required_any, Validate, ValidationError,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/projects`
pub struct ProjectsApi<'a> {
    client: &'a SonarClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, options: &CreateOptions) -> Result<CreatedProject, SonarError> {
        let res: CreateResponse = self
            .client
            .json(Method::POST, "api/projects/create", Some(options))
            .await?;
        Ok(res.project)
    }

    pub async fn delete(&self, options: &DeleteOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/projects/delete", Some(options))
            .await?;
        Ok(())
    }

    /// Delete every project matched by the given filters.
    pub async fn bulk_delete(&self, options: &BulkDeleteOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/projects/bulk_delete", Some(options))
            .await?;
        Ok(())
    }

    pub async fn search(
        &self,
        options: Option<&SearchOptions>,
    ) -> Result<SearchResponse, SonarError> {
        self.client
            .json(Method::GET, "api/projects/search", options)
            .await
    }

    pub async fn update_key(&self, options: &UpdateKeyOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/projects/update_key", Some(options))
            .await?;
        Ok(())
    }

    pub async fn update_visibility(
        &self,
        options: &UpdateVisibilityOptions,
    ) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/projects/update_visibility", Some(options))
            .await?;
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    /// Key of the project, at most 400 characters.
    pub project: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_branch: Option<String>,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("project", &self.project)?;
        max_length("project", &self.project, PROJECT_KEY_MAX)?;
        required("name", &self.name)?;
        max_length("name", &self.name, PROJECT_NAME_MAX)?;
        one_of_opt("visibility", self.visibility.as_deref(), &PROJECT_VISIBILITIES)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DeleteOptions {
    pub project: String,
}

impl Validate for DeleteOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("project", &self.project)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteOptions {
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Date, or date-time, before which the last analysis happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_provisioned_only: Option<bool>,
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<String>,
}

impl Validate for BulkDeleteOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required_any(
            "projects|q|analyzedBefore",
            &[&self.projects, &self.q, &self.analyzed_before],
        )?;
        all_of("qualifiers", &self.qualifiers, &PROJECT_QUALIFIERS)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_provisioned_only: Option<bool>,
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
}

impl Validate for SearchOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        all_of("qualifiers", &self.qualifiers, &PROJECT_QUALIFIERS)?;
        one_of_opt("visibility", self.visibility.as_deref(), &PROJECT_VISIBILITIES)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct UpdateKeyOptions {
    pub from: String,
    pub to: String,
}

impl Validate for UpdateKeyOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("from", &self.from)?;
        required("to", &self.to)?;
        max_length("to", &self.to, PROJECT_KEY_MAX)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct UpdateVisibilityOptions {
    pub project: String,
    pub visibility: String,
}

impl UpdateVisibilityOptions {
    pub fn new(project: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            project: project.into(),
            visibility: visibility.as_str().to_string(),
        }
    }
}

impl Validate for UpdateVisibilityOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("project", &self.project)?;
        required("visibility", &self.visibility)?;
        one_of("visibility", &self.visibility, &PROJECT_VISIBILITIES)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreatedProject {
    pub key: ComponentKey,
    pub name: String,
    pub qualifier: String,
    pub visibility: Option<Visibility>,
}

#[derive(Deserialize)]
struct CreateResponse {
    project: CreatedProject,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub key: ComponentKey,
    pub name: String,
    pub qualifier: String,
    pub visibility: Option<Visibility>,
    pub last_analysis_date: Option<DateTimeString>,
    pub revision: Option<String>,
    #[serde(default)]
    pub managed: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub paging: Paging,
    pub components: Vec<Component>,
}
