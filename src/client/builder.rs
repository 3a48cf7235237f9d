use super::SonarClient;
use crate::auth::Auth;
use crate::errors::SonarError;
use crate::types::ServerUrl;
use reqwest_middleware::Middleware;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and creates a [SonarClient].
pub struct SonarClientBuilder {
    url: ServerUrl,
    auth: Option<Auth>,
    timeout: Option<Duration>,
    user_agent: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl SonarClientBuilder {
    pub(crate) fn new(url: ServerUrl) -> Self {
        Self {
            url,
            auth: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            middleware: Vec::new(),
        }
    }

    pub fn auth(self, auth: Auth) -> Self {
        Self {
            auth: Some(auth),
            ..self
        }
    }

    /// Authenticate with a login and password.
    pub fn basic_auth(self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth(Auth::Basic {
            login: login.into(),
            password: password.into(),
        })
    }

    /// Authenticate with a user token, sent as the Basic auth username.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.auth(Auth::Token(token.into()))
    }

    /// Authenticate with a user token, sent as a Bearer token.
    pub fn bearer(self, token: impl Into<String>) -> Self {
        self.auth(Auth::Bearer(token.into()))
    }

    /// Total time allowed for each request, from connecting until the body is read.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..self
        }
    }

    /// Add middleware to the HTTP client.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Create the client. No request is made.
    pub fn build(self) -> Result<SonarClient, SonarError> {
        let base = self.url.to_base()?;
        let mut http = reqwest::ClientBuilder::new().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let builder = self.middleware.into_iter().fold(
            reqwest_middleware::ClientBuilder::new(http.build()?),
            |builder, middleware| builder.with_arc(middleware),
        );
        log::debug!("SonarQube client for {}", base);
        Ok(SonarClient {
            client: builder.build(),
            url: self.url,
            base,
            auth: self.auth,
        })
    }
}

impl fmt::Debug for SonarClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SonarClientBuilder")
            .field("url", &self.url)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
