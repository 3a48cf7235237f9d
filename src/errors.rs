//! Errors for this crate.
//! About anyhow: see https://github.com/TrueLayer/reqwest-middleware/issues/119

use crate::client::ResponseMeta;
use crate::validation::ValidationError;
use reqwest::StatusCode;
use std::fmt;

#[derive(thiserror::Error, Debug)]
pub enum InvalidServerUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL has a query string or fragment: {0}")]
    NotABase(String),
}

aliri_braid::from_infallible!(InvalidServerUrl);

/// Errors which might occur while assembling a client configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Url(#[from] InvalidServerUrl),
}

/// Errors representing failed interactions with SonarQube.
#[derive(thiserror::Error, Debug)]
pub enum SonarError {
    /// Options were rejected before any request was built.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request path could not be resolved against the base URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request path contains escapes which do not decode to UTF-8.
    #[error("cannot unescape request path {path:?}: {source}")]
    PathUnescape {
        path: String,
        source: std::string::FromUtf8Error,
    },

    #[error("cannot encode query string: {0}")]
    QueryEncode(#[from] serde_urlencoded::ser::Error),

    #[error("cannot encode request body: {0}")]
    BodyEncode(serde_json::Error),

    /// Error response without explanation, e.g. connection refused or TLS failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Error from reqwest middleware function.
    #[error(transparent)]
    Middleware(anyhow::Error),

    /// The server answered with a success status but the body is unusable.
    #[error("{} {}: cannot decode response body: {source}", .response.method, .response.url)]
    Decode {
        response: Box<ResponseMeta>,
        source: DecodeError,
    },

    /// Error response with an explanation from SonarQube.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failed to write a response body into the given sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SonarError {
    /// HTTP status of the response which caused this error, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SonarError::Api(e) => Some(e.response.status),
            SonarError::Decode { response, .. } => Some(response.status),
            SonarError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether this error was raised by client-side validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, SonarError::Validation(_))
    }
}

impl From<reqwest_middleware::Error> for SonarError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(e) => SonarError::Middleware(e),
            reqwest_middleware::Error::Reqwest(e) => SonarError::Transport(e),
        }
    }
}

/// Reasons a successful response body could not be decoded.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected \"true\" or \"false\", got {0:?}")]
    Bool(String),
}

/// A non-success response from the API.
///
/// Displayed as `<method> <scheme>://<host><path>: <status> <message>`.
#[derive(Debug)]
pub struct ApiError {
    pub response: ResponseMeta,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.response.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = &self.response.url;
        write!(
            f,
            "{} {}://{}",
            self.response.method,
            url.scheme(),
            url.host_str().unwrap_or_default()
        )?;
        if let Some(port) = url.port() {
            write!(f, ":{}", port)?;
        }
        write!(
            f,
            "{}: {} {}",
            self.response.path,
            self.response.status.as_u16(),
            self.message
        )
    }
}

impl std::error::Error for ApiError {}
