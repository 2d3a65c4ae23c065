use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;

use super::{
    error::CaptureError,
    models::{CaptureKind, CaptureRequest, CaptureResult},
};

/// HTTP client for the capture service's health, screenshot and recording
/// endpoints.
pub struct CaptureClient {
    http: Client,
    config: ClientConfig,
}

impl CaptureClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("screech/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Calls `/health`. Prints the decoded body on success and a diagnostic
    /// otherwise; never fails.
    pub async fn check_health(&self) -> bool {
        println!("Testing health endpoint...");
        match self.fetch_health().await {
            Ok((status, body)) => {
                println!("{} {}", "Status:".bold(), status.as_u16().to_string().green());
                println!("{} {}", "Response:".bold(), body);
                println!();
                true
            }
            Err(err) => {
                if err.is_timeout() {
                    warn!(timeout = ?self.config.health_timeout, "health check timed out");
                }
                println!("{} Health check failed: {}", "✗".red(), err);
                println!();
                false
            }
        }
    }

    async fn fetch_health(&self) -> Result<(StatusCode, Value), CaptureError> {
        let endpoint = self.endpoint("health");
        debug!(%endpoint, "probing capture service");

        let response = self
            .http
            .get(&endpoint)
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(|source| CaptureError::transport(&endpoint, source))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| CaptureError::transport(&endpoint, source))?;

        if !status.is_success() {
            return Err(CaptureError::status(status, &bytes));
        }

        let body = serde_json::from_slice(&bytes)
            .map_err(|source| CaptureError::Decode { status, source })?;
        Ok((status, body))
    }

    pub async fn capture_screenshot(&self, url: &str, width: u32, height: u32) -> CaptureResult {
        let request = CaptureRequest::screenshot(url, width, height);
        self.capture(CaptureKind::Screenshot, &request, self.config.capture_timeout)
            .await
    }

    /// The request timeout is extended by the recording length, since the
    /// server holds the response until the screencast is encoded.
    pub async fn capture_recording(
        &self,
        url: &str,
        duration_seconds: u32,
        width: u32,
        height: u32,
    ) -> CaptureResult {
        let request = CaptureRequest::recording(url, duration_seconds, width, height);
        let timeout = self.recording_timeout(duration_seconds);
        self.capture(CaptureKind::Recording, &request, timeout).await
    }

    fn recording_timeout(&self, duration_seconds: u32) -> Duration {
        self.config
            .capture_timeout
            .saturating_add(Duration::from_secs(duration_seconds.into()))
    }

    async fn capture(
        &self,
        kind: CaptureKind,
        request: &CaptureRequest,
        timeout: Duration,
    ) -> CaptureResult {
        match self.send_capture(kind, request, timeout).await {
            Ok(result) => result,
            Err(err) => {
                warn!(%kind, error = %err, "capture request failed");
                CaptureResult::failure(err.to_string())
            }
        }
    }

    async fn send_capture(
        &self,
        kind: CaptureKind,
        request: &CaptureRequest,
        timeout: Duration,
    ) -> Result<CaptureResult, CaptureError> {
        let endpoint = self.endpoint(kind.label());
        debug!(%endpoint, url = %request.url, width = request.width, height = request.height, "sending capture request");

        let start = Instant::now();
        let response = self
            .http
            .post(&endpoint)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| CaptureError::transport(&endpoint, source))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| CaptureError::transport(&endpoint, source))?;
        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "capture response received"
        );

        // Error statuses still carry a JSON envelope; only fall back to the
        // raw status when the body is not one.
        match serde_json::from_slice::<CaptureResult>(&bytes) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(CaptureError::status(status, &bytes)),
            Err(source) => Err(CaptureError::Decode { status, source }),
        }
    }
}
