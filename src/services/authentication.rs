use crate::client::{SonarClient, NO_OPTIONS};
use crate::errors::SonarError;
use reqwest::Method;
use serde::Deserialize;

/// `api/authentication`
pub struct AuthenticationApi<'a> {
    client: &'a SonarClient,
}

impl<'a> AuthenticationApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Check the credentials of the client.
    ///
    /// Invalid credentials are not an error: the server answers with `valid: false`.
    pub async fn validate(&self) -> Result<ValidateResponse, SonarError> {
        self.client
            .json(Method::GET, "api/authentication/validate", NO_OPTIONS)
            .await
    }

    pub async fn logout(&self) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/authentication/logout", NO_OPTIONS)
            .await?;
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub struct ValidateResponse {
    pub valid: bool,
}
