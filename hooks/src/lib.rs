//! Yew hooks that track a request's loading/success/error state.
//!
//! ```ignore
//! #[function_component]
//! fn Items() -> Html {
//!     let (state, refetch) = use_fetch_state(FetchStateOptions {
//!         initial_url: "/api/items".into(),
//!         ..Default::default()
//!     });
//!     match state.phase() {
//!         Phase::Loading => html! { <p>{"Loading..."}</p> },
//!         Phase::Error => html! {
//!             <button onclick={move |_| refetch.emit(None)}>{"Retry"}</button>
//!         },
//!         _ => html! { <pre>{format!("{:?}", state.data)}</pre> },
//!     }
//! }
//! ```

use http_helpers::HttpClient;

pub mod logs;
pub mod use_fetch_state;
pub mod use_send_state;

pub use http_helpers::{
    FetchOptions, FetchStateOptions, HookState, Payload, Phase, SendOptions,
    SendRequest, SendStateOptions,
};
pub use use_fetch_state::use_fetch_state;
pub use use_send_state::use_send_state;

/// Client used by the hooks: build-time `BACKEND_URL` or the page origin,
/// with the CSRF token read from the page's meta tag.
pub fn get_http_client() -> HttpClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_default()
        });

    let client = HttpClient::new(address);

    #[cfg(target_arch = "wasm32")]
    let client = client.with_csrf(http_helpers::MetaTagCsrf);

    client
}
