//! The send primitive: a mutating request carrying a JSON body.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::csrf::CSRF_HEADER;
use crate::error::transport_status;
use crate::{HttpClient, Payload, RequestError};

#[derive(Debug, Clone, PartialEq)]
pub struct SendOptions {
    pub content_type: String,
    pub method: Method,
    /// Include credentials on cross-origin requests. Only meaningful in the
    /// browser; native clients manage cookies on the client itself.
    pub with_credentials: bool,
    /// Attach the client's CSRF token, when it has one.
    pub with_csrf: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            content_type: "application/json".into(),
            method: Method::POST,
            with_credentials: true,
            with_csrf: true,
        }
    }
}

impl SendOptions {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl HttpClient {
    /// Send `data` as a JSON body, resolving with the response on a 2xx
    /// status.
    ///
    /// Successful bodies are parsed as JSON when possible and returned as
    /// raw text otherwise. A missing or `null` `data` sends no body. There is
    /// no timeout.
    pub async fn send(
        &self,
        url: &str,
        data: Option<&Value>,
        options: &SendOptions,
    ) -> Result<Payload, RequestError> {
        let Some(target) = self.resolve_url(url) else {
            tracing::warn!(url, "Could not resolve send url");
            return Err(RequestError::transport(0, ""));
        };
        tracing::debug!(%target, method = %options.method, "Sending");

        let mut request = self
            .inner_client
            .request(options.method.clone(), target)
            .header(CONTENT_TYPE, &options.content_type);

        if options.with_csrf {
            match self.csrf.csrf_token() {
                Some(token) => request = request.header(CSRF_HEADER, token),
                None => tracing::debug!(url, "No CSRF token available"),
            }
        }

        if let Some(data) = data.filter(|data| !data.is_null()) {
            request = request.body(data.to_string());
        }

        #[cfg(target_arch = "wasm32")]
        let request = if options.with_credentials {
            request.fetch_credentials_include()
        } else {
            request.fetch_credentials_same_origin()
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url, "Send failed: {e}");
            RequestError::transport(transport_status(&e), "")
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::transport(transport_status(&e), ""))?;
        tracing::debug!(url, %status, "Send settled");

        if status.is_success() {
            Ok(Payload::parse_json_or_text(body))
        } else {
            Err(RequestError::from_status(status, Payload::Text(body)))
        }
    }
}
