use crate::client::{Response, SonarClient, NO_OPTIONS};
use crate::errors::SonarError;
use reqwest::Method;
use tokio::io::AsyncWrite;

/// `api/monitoring`
pub struct MonitoringApi<'a> {
    client: &'a SonarClient,
}

impl<'a> MonitoringApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Metrics in the Prometheus text exposition format.
    pub async fn metrics(&self) -> Result<String, SonarError> {
        self.client
            .text(Method::GET, "api/monitoring/metrics", NO_OPTIONS)
            .await
    }

    pub async fn metrics_to<W>(&self, writer: &mut W) -> Result<Response, SonarError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.client
            .copy_to("api/monitoring/metrics", NO_OPTIONS, writer)
            .await
    }
}
