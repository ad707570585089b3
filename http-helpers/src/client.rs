use std::sync::Arc;

use reqwest::Url;

use crate::csrf::{CsrfSource, NoCsrf};

/// An HTTP client for issuing fetch and send requests.
#[derive(Clone)]
pub struct HttpClient {
    /// Base address that relative request URLs are joined onto.
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Where [`HttpClient::send`] looks up the anti-forgery token.
    pub csrf: Arc<dyn CsrfSource>,
}

impl HttpClient {
    /// Build a client for `address` with no CSRF token source.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            csrf: Arc::new(NoCsrf),
        }
    }

    /// Replace the CSRF token source.
    pub fn with_csrf(mut self, csrf: impl CsrfSource + 'static) -> Self {
        self.csrf = Arc::new(csrf);
        self
    }

    /// Absolute URLs pass through untouched; anything else is joined onto
    /// the client address, the way a browser resolves `/api/items` against
    /// the page origin.
    pub fn resolve_url(&self, url: &str) -> Option<Url> {
        match Url::parse(url) {
            Ok(url) => Some(url),
            Err(_) => Url::parse(&self.address)
                .and_then(|base| base.join(url))
                .ok(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
