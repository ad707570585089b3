//! The fetch primitive: a read-only GET guarded by a response-start timeout.

use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};
use serde_json::Value;

use crate::error::transport_status;
use crate::{HttpClient, Payload, RequestError, TRANSPORT_ERROR_TEXT};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// How long to wait for the response to start. A response whose headers
    /// arrived in time is never cut off, however slow its body.
    pub timeout: Duration,
    /// Parse the body as JSON. An unparseable body becomes `null`.
    pub json: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            json: true,
        }
    }
}

impl FetchOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl HttpClient {
    /// `GET url`, resolving with the body on a 2xx status.
    ///
    /// If the response has not started within `options.timeout` the request
    /// is dropped, which aborts it, and the call fails with
    /// [`RequestError::timeout`].
    pub async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<Payload, RequestError> {
        let Some(target) = self.resolve_url(url) else {
            tracing::warn!(url, "Could not resolve fetch url");
            return Err(RequestError::transport(0, TRANSPORT_ERROR_TEXT));
        };
        tracing::debug!(%target, "Fetching");

        let request = pin!(self.inner_client.get(target).send());
        let timer = pin!(sleep(options.timeout));
        let response = match select(request, timer).await {
            Either::Left((response, _)) => response,
            Either::Right(_) => {
                tracing::warn!(url, timeout = ?options.timeout, "Fetch timed out");
                return Err(RequestError::timeout());
            }
        };
        let response = response.map_err(|e| {
            tracing::warn!(url, "Fetch failed: {e}");
            RequestError::transport(transport_status(&e), TRANSPORT_ERROR_TEXT)
        })?;

        let status = response.status();
        let payload = if options.json {
            let body = response.bytes().await.map_err(|e| {
                RequestError::transport(
                    transport_status(&e),
                    TRANSPORT_ERROR_TEXT,
                )
            })?;
            Payload::Json(serde_json::from_slice(&body).unwrap_or(Value::Null))
        } else {
            let body = response.text().await.map_err(|e| {
                RequestError::transport(
                    transport_status(&e),
                    TRANSPORT_ERROR_TEXT,
                )
            })?;
            Payload::Text(body)
        };
        tracing::debug!(url, %status, "Fetch settled");

        if status.is_success() {
            Ok(payload)
        } else {
            Err(RequestError::from_status(status, payload))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await
}
