//! Client configuration from the environment, or from any deserializable source.
//!
//! The environment variables follow the names used by the SonarQube scanners:
//! `SONAR_HOST_URL`, `SONAR_TOKEN`, `SONAR_LOGIN` and `SONAR_PASSWORD`.

use crate::auth::Auth;
use crate::client::SonarClientBuilder;
use crate::errors::ConfigError;
use crate::types::ServerUrl;
use serde::Deserialize;
use std::time::Duration;

pub const ENV_HOST_URL: &str = "SONAR_HOST_URL";
pub const ENV_TOKEN: &str = "SONAR_TOKEN";
pub const ENV_LOGIN: &str = "SONAR_LOGIN";
pub const ENV_PASSWORD: &str = "SONAR_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "SONAR_TIMEOUT_SECS";

/// Settings needed to construct a [crate::SonarClient].
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ClientConfig {
    pub url: Option<ServerUrl>,
    pub token: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |name| lookup(name).filter(|v: &String| !v.is_empty());
        let url = get(ENV_HOST_URL).map(ServerUrl::try_from).transpose()?;
        let timeout_secs = get(ENV_TIMEOUT_SECS)
            .map(|value| {
                value.parse().map_err(|_| ConfigError::Invalid {
                    name: ENV_TIMEOUT_SECS,
                    value,
                })
            })
            .transpose()?;
        Ok(Self {
            url,
            token: get(ENV_TOKEN),
            login: get(ENV_LOGIN),
            password: get(ENV_PASSWORD),
            timeout_secs,
        })
    }

    /// The credentials described by these settings. A token takes precedence
    /// over a login and password.
    pub fn auth(&self) -> Option<Auth> {
        if let Some(token) = &self.token {
            return Some(Auth::Token(token.clone()));
        }
        self.login.as_ref().map(|login| Auth::Basic {
            login: login.clone(),
            password: self.password.clone().unwrap_or_default(),
        })
    }

    /// Create a client builder from these settings.
    pub fn into_builder(self) -> Result<SonarClientBuilder, ConfigError> {
        let auth = self.auth();
        let url = self.url.ok_or(ConfigError::Missing(ENV_HOST_URL))?;
        let mut builder = SonarClientBuilder::new(url);
        if let Some(auth) = auth {
            builder = builder.auth(auth);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }
}
