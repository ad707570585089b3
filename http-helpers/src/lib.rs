//! Client-side request helpers.
//!
//! Two single-shot primitives live on [`HttpClient`]: [`HttpClient::fetch`]
//! (GET with a response-start timeout) and [`HttpClient::send`] (a mutating
//! request with a JSON body and an anti-forgery header). The [`state`]
//! module holds the loading/success/error reducer shared by the
//! framework-free [`FetchController`]/[`SendController`] and the yew hooks.

mod client;
pub mod controller;
pub mod csrf;
mod error;
pub mod fetch;
mod payload;
pub mod send;
pub mod state;

pub use client::HttpClient;
pub use controller::{
    FetchController, FetchStateOptions, SendController, SendRequest,
    SendStateOptions,
};
pub use csrf::{CsrfSource, FixedCsrf, NoCsrf};
pub use error::{
    RequestError, TIMEOUT_STATUS, TIMEOUT_TEXT, TRANSPORT_ERROR_TEXT,
};
pub use fetch::FetchOptions;
pub use payload::Payload;
pub use send::SendOptions;
pub use state::{HookState, Phase, RequestAction};

#[cfg(target_arch = "wasm32")]
pub use csrf::MetaTagCsrf;
