use crate::client::{Response, SonarClient};
use crate::errors::SonarError;
use crate::types::DateTimeString;
use crate::validation::{required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

/// `api/sources`
pub struct SourcesApi<'a> {
    client: &'a SonarClient,
}

impl<'a> SourcesApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Get the source code of a file as plain text.
    pub async fn raw(&self, options: &RawOptions) -> Result<String, SonarError> {
        self.client
            .text(Method::GET, "api/sources/raw", Some(options))
            .await
    }

    /// Copy the source code of a file into `writer` without buffering it.
    pub async fn raw_to<W>(&self, options: &RawOptions, writer: &mut W) -> Result<Response, SonarError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.client
            .copy_to("api/sources/raw", Some(options), writer)
            .await
    }

    /// Get source code as line number and HTML-highlighted code pairs.
    pub async fn show(&self, options: &LinesOptions) -> Result<ShowResponse, SonarError> {
        self.client
            .json(Method::GET, "api/sources/show", Some(options))
            .await
    }

    /// Get source code lines with SCM and coverage details.
    pub async fn lines(&self, options: &LinesOptions) -> Result<LinesResponse, SonarError> {
        self.client
            .json(Method::GET, "api/sources/lines", Some(options))
            .await
    }

    /// Get SCM information of source lines.
    pub async fn scm(&self, options: &ScmOptions) -> Result<ScmResponse, SonarError> {
        self.client
            .json(Method::GET, "api/sources/scm", Some(options))
            .await
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    /// File key, e.g. `my_project:src/foo/Bar.php`
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<String>,
}

impl RawOptions {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

impl Validate for RawOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("key", &self.key)
    }
}

/// Range of lines of a file. Line numbers start at 1.
#[derive(Serialize, Debug, Clone, Default)]
pub struct LinesOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

impl Validate for LinesOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("key", &self.key)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScmOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
    /// Group lines by SCM commit if false, else display commits for each line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_by_line: Option<bool>,
}

impl Validate for ScmOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("key", &self.key)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ShowResponse {
    /// Pairs of line number and code.
    pub sources: Vec<(u32, String)>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub line: u32,
    pub code: String,
    pub scm_revision: Option<String>,
    pub scm_author: Option<String>,
    pub scm_date: Option<DateTimeString>,
    pub line_hits: Option<u32>,
    pub conditions: Option<u32>,
    pub covered_conditions: Option<u32>,
    #[serde(default)]
    pub duplicated: bool,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LinesResponse {
    pub sources: Vec<Line>,
}

/// One line of `api/sources/scm`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScmLine(pub u32, pub String, pub DateTimeString, pub String);

impl ScmLine {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn author(&self) -> &str {
        &self.1
    }

    pub fn date(&self) -> &DateTimeString {
        &self.2
    }

    pub fn revision(&self) -> &str {
        &self.3
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScmResponse {
    pub scm: Vec<ScmLine>,
}
