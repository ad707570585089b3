//! Anti-forgery token lookup for mutating requests.
//!
//! The token source is injected into [`crate::HttpClient`] so the send
//! primitive never reaches into a page environment on its own. In the
//! browser, [`MetaTagCsrf`] reads the token from the page; elsewhere a
//! closure or [`FixedCsrf`] stands in.

/// Header carrying the token on outgoing requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Where the page publishes its token; the value is the `content`
/// attribute.
pub const CSRF_META_SELECTOR: &str = "meta[name=csrf-token]";

/// Something that can produce the current anti-forgery token, if any.
pub trait CsrfSource: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

impl<F> CsrfSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn csrf_token(&self) -> Option<String> {
        self()
    }
}

/// Never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCsrf;

impl CsrfSource for NoCsrf {
    fn csrf_token(&self) -> Option<String> {
        None
    }
}

/// Always yields the same token.
#[derive(Debug, Clone)]
pub struct FixedCsrf(pub String);

impl CsrfSource for FixedCsrf {
    fn csrf_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Reads the token from `<meta name="csrf-token" content="...">` each time
/// it is asked, so a token rotated by the page is picked up.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagCsrf;

#[cfg(target_arch = "wasm32")]
impl CsrfSource for MetaTagCsrf {
    fn csrf_token(&self) -> Option<String> {
        web_sys::window()?
            .document()?
            .query_selector(CSRF_META_SELECTOR)
            .ok()
            .flatten()?
            .get_attribute("content")
    }
}
