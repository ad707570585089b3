use reqwest::StatusCode;

use crate::Payload;

/// Status reported when a fetch gives up waiting for a response.
pub const TIMEOUT_STATUS: u16 = 408;
pub const TIMEOUT_TEXT: &str = "Request timed out.";
/// Status text of a fetch that never got a response at all.
pub const TRANSPORT_ERROR_TEXT: &str = "There was an error making the request.";

/// Why a request did not resolve with a payload.
///
/// Covers non-2xx responses, transport failures (status usually 0) and the
/// fetch timeout (status 408).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{status} {status_text}")]
pub struct RequestError {
    pub status: u16,
    pub status_text: String,
    /// The response body, when a response arrived.
    pub response: Option<Payload>,
}

impl RequestError {
    pub fn timeout() -> Self {
        Self {
            status: TIMEOUT_STATUS,
            status_text: TIMEOUT_TEXT.into(),
            response: None,
        }
    }

    pub fn transport(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            response: None,
        }
    }

    /// A completed response outside of [200, 300).
    pub fn from_status(status: StatusCode, response: Payload) -> Self {
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().into(),
            response: Some(response),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.status == TIMEOUT_STATUS && self.status_text == TIMEOUT_TEXT
    }
}

/// Status of a transport error, or 0 when the transport has none to report.
pub(crate) fn transport_status(error: &reqwest::Error) -> u16 {
    error.status().map_or(0, |status| status.as_u16())
}
