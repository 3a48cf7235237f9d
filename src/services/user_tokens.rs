use crate::client::SonarClient;
use crate::constants::TOKEN_NAME_MAX;
use crate::errors::SonarError;
use crate::types::{DateTimeString, Login};
use crate::validation::{max_length, required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/user_tokens`
pub struct UserTokensApi<'a> {
    client: &'a SonarClient,
}

impl<'a> UserTokensApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Generate a user token. The token value is only ever returned here.
    pub async fn generate(&self, options: &GenerateOptions) -> Result<GeneratedToken, SonarError> {
        self.client
            .json(Method::POST, "api/user_tokens/generate", Some(options))
            .await
    }

    pub async fn revoke(&self, options: &RevokeOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/user_tokens/revoke", Some(options))
            .await?;
        Ok(())
    }

    /// List the tokens of a user, or of the current user if no login is given.
    pub async fn search(
        &self,
        options: Option<&SearchOptions>,
    ) -> Result<SearchResponse, SonarError> {
        self.client
            .json(Method::GET, "api/user_tokens/search", options)
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct GenerateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl Validate for GenerateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        max_length("name", &self.name, TOKEN_NAME_MAX)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct RevokeOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl Validate for RevokeOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl Validate for SearchOptions {}

// the token is a secret, so no Debug
#[derive(Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedToken {
    pub login: Login,
    pub name: String,
    pub token: String,
    pub created_at: Option<DateTimeString>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    pub name: String,
    pub created_at: Option<DateTimeString>,
    pub last_connection_date: Option<DateTimeString>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub login: Login,
    pub user_tokens: Vec<UserToken>,
}
