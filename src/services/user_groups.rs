use crate::client::SonarClient;
use crate::constants::{GROUP_DESCRIPTION_MAX, GROUP_NAME_MAX, USER_GROUP_FIELDS};
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::Paging;
use crate::validation::{all_of, max_length, max_length_opt, required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/user_groups`
pub struct UserGroupsApi<'a> {
    client: &'a SonarClient,
}

impl<'a> UserGroupsApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, options: &CreateOptions) -> Result<Group, SonarError> {
        let res: GroupResponse = self
            .client
            .json(Method::POST, "api/user_groups/create", Some(options))
            .await?;
        Ok(res.group)
    }

    pub async fn delete(&self, options: &DeleteOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/user_groups/delete", Some(options))
            .await?;
        Ok(())
    }

    pub async fn search(
        &self,
        options: Option<&SearchOptions>,
    ) -> Result<SearchResponse, SonarError> {
        self.client
            .json(Method::GET, "api/user_groups/search", options)
            .await
    }

    pub async fn add_user(&self, options: &MembershipOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/user_groups/add_user", Some(options))
            .await?;
        Ok(())
    }

    pub async fn remove_user(&self, options: &MembershipOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/user_groups/remove_user", Some(options))
            .await?;
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct CreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        max_length("name", &self.name, GROUP_NAME_MAX)?;
        max_length_opt(
            "description",
            self.description.as_deref(),
            GROUP_DESCRIPTION_MAX,
        )
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DeleteOptions {
    pub name: String,
}

impl Validate for DeleteOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct SearchOptions {
    /// Any of `name`, `description`, `membersCount`.
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub f: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl Validate for SearchOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        all_of("f", &self.f, &USER_GROUP_FIELDS)
    }
}

/// Adds a user to, or removes a user from, a group.
#[derive(Serialize, Debug, Clone, Default)]
pub struct MembershipOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl Validate for MembershipOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub description: Option<String>,
    pub members_count: Option<u32>,
    #[serde(default)]
    pub default: bool,
}

#[derive(Deserialize)]
struct GroupResponse {
    group: Group,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub paging: Paging,
    pub groups: Vec<Group>,
}
