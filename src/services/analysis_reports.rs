use crate::client::{Destination, SonarClient, NO_OPTIONS};
use crate::errors::{DecodeError, SonarError};
use reqwest::Method;

/// `api/analysis_reports`
pub struct AnalysisReportsApi<'a> {
    client: &'a SonarClient,
}

impl<'a> AnalysisReportsApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Whether the queue of analysis reports waiting to be processed is empty.
    /// The server answers with a plain-text `true` or `false`.
    pub async fn is_queue_empty(&self) -> Result<bool, SonarError> {
        let req = self.client.build_request(
            Method::GET,
            "api/analysis_reports/is_queue_empty",
            NO_OPTIONS,
        )?;
        let res = self.client.execute(req, Destination::Text).await?;
        let text = res.text()?;
        let value = match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        };
        value.ok_or_else(|| res.decode_error(DecodeError::Bool(text)))
    }
}
