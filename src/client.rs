//! The SonarQube client and its request pipeline.
mod builder;
mod request;
mod response;

pub use builder::SonarClientBuilder;
pub use response::{Destination, Response, ResponseMeta};

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::errors::SonarError;
use crate::services::*;
use crate::types::ServerUrl;
use crate::validation::Validate;
use reqwest::Method;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWrite;

/// SonarQube Web API client.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SonarClient {
    client: ClientWithMiddleware,
    url: ServerUrl,
    base: url::Url,
    auth: Option<Auth>,
}

/// Placeholder options type for endpoints which take no parameters.
#[derive(Serialize, Debug, Clone, Copy, Default)]
pub(crate) struct NoOptions;

impl Validate for NoOptions {}

pub(crate) const NO_OPTIONS: Option<&NoOptions> = None;

impl SonarClient {
    /// Create a client builder.
    pub fn builder(url: ServerUrl) -> SonarClientBuilder {
        SonarClientBuilder::new(url)
    }

    /// Create a client configured by `SONAR_*` environment variables,
    /// see [ClientConfig::from_env].
    pub fn from_env() -> Result<Self, SonarError> {
        ClientConfig::from_env()?.into_builder()?.build()
    }

    /// Get the server URL this client talks to.
    pub fn url(&self) -> &ServerUrl {
        &self.url
    }

    pub fn analysis_reports(&self) -> AnalysisReportsApi<'_> {
        AnalysisReportsApi::new(self)
    }

    /// Compute Engine tasks.
    pub fn ce(&self) -> CeApi<'_> {
        CeApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn user_groups(&self) -> UserGroupsApi<'_> {
        UserGroupsApi::new(self)
    }

    pub fn user_tokens(&self) -> UserTokensApi<'_> {
        UserTokensApi::new(self)
    }

    pub fn plugins(&self) -> PluginsApi<'_> {
        PluginsApi::new(self)
    }

    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi::new(self)
    }

    pub fn sources(&self) -> SourcesApi<'_> {
        SourcesApi::new(self)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    pub fn navigation(&self) -> NavigationApi<'_> {
        NavigationApi::new(self)
    }

    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    pub fn server(&self) -> ServerApi<'_> {
        ServerApi::new(self)
    }

    pub fn authentication(&self) -> AuthenticationApi<'_> {
        AuthenticationApi::new(self)
    }

    pub fn monitoring(&self) -> MonitoringApi<'_> {
        MonitoringApi::new(self)
    }

    // ==================================================
    //                 HELPER METHODS
    // ==================================================

    /// Build, send, and keep the body of a request.
    async fn call<O>(
        &self,
        method: Method,
        path: &str,
        options: Option<&O>,
        destination: Destination<'_>,
    ) -> Result<Response, SonarError>
    where
        O: Serialize + Validate + Sync + ?Sized,
    {
        let req = self.build_request(method, path, options)?;
        self.execute(req, destination).await
    }

    pub(crate) async fn json<O, T>(
        &self,
        method: Method,
        path: &str,
        options: Option<&O>,
    ) -> Result<T, SonarError>
    where
        O: Serialize + Validate + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.call(method, path, options, Destination::Json)
            .await?
            .json()
    }

    pub(crate) async fn text<O>(
        &self,
        method: Method,
        path: &str,
        options: Option<&O>,
    ) -> Result<String, SonarError>
    where
        O: Serialize + Validate + Sync + ?Sized,
    {
        self.call(method, path, options, Destination::Text)
            .await?
            .text()
    }

    /// Send a request whose response body is of no interest.
    pub(crate) async fn send<O>(
        &self,
        method: Method,
        path: &str,
        options: Option<&O>,
    ) -> Result<Response, SonarError>
    where
        O: Serialize + Validate + Sync + ?Sized,
    {
        self.call(method, path, options, Destination::Discard).await
    }

    /// Copy the response body of a GET request into `writer`.
    pub(crate) async fn copy_to<O, W>(
        &self,
        path: &str,
        options: Option<&O>,
        writer: &mut W,
    ) -> Result<Response, SonarError>
    where
        O: Serialize + Validate + Sync + ?Sized,
        W: AsyncWrite + Unpin + Send,
    {
        self.call(Method::GET, path, options, Destination::Writer(writer))
            .await
    }
}
