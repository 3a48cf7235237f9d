use crate::client::{SonarClient, NO_OPTIONS};
use crate::errors::SonarError;
use reqwest::Method;

/// `api/server`
pub struct ServerApi<'a> {
    client: &'a SonarClient,
}

impl<'a> ServerApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Version of the server, e.g. `10.2.1.78527`.
    pub async fn version(&self) -> Result<String, SonarError> {
        let version = self
            .client
            .text(Method::GET, "api/server/version", NO_OPTIONS)
            .await?;
        Ok(version.trim().to_string())
    }
}
