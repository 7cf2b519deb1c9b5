//! Asynchronous client for the report rendering server.

mod error;

use std::time::Duration;

use futures::future::BoxFuture;

use crate::model::{ReportRequest, ReportResponse};
use crate::server::{ErrorBody, REPORT_PATH};

pub use error::SubmitError;

/// Anything that can turn a report request into a BBCode document.
pub trait ReportClient: Send + Sync {
    /// Submits the request and returns the generated document.
    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<String, SubmitError>>;
}

/// [`ReportClient`] that posts to the HTTP boundary.
///
/// Each attempt is bounded by `timeout`. A transport failure or timeout is
/// retried once; an error status from the server is returned immediately.
#[derive(Debug, Clone)]
pub struct HttpReportClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpReportClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:3001`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{REPORT_PATH}", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    /// Returns the full URL of the report endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn attempt(&self, request: &ReportRequest) -> Result<String, SubmitError> {
        match tokio::time::timeout(self.timeout, self.post(request)).await {
            Ok(result) => result,
            Err(_) => Err(SubmitError::Timeout(self.timeout)),
        }
    }

    async fn post(&self, request: &ReportRequest) -> Result<String, SubmitError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            let body: ReportResponse = response.json().await.map_err(SubmitError::Decode)?;
            return Ok(body.result);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };
        Err(SubmitError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl ReportClient for HttpReportClient {
    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<String, SubmitError>> {
        Box::pin(async move {
            match self.attempt(request).await {
                Err(e) if e.is_retryable() => {
                    tracing::warn!(endpoint = %self.endpoint, "submission failed, retrying: {e}");
                    self.attempt(request).await
                }
                result => result,
            }
        })
    }
}
