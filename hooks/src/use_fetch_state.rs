use http_helpers::controller::run_fetch;
use http_helpers::{FetchStateOptions, HookState, Payload};
use yew::prelude::*;

use crate::get_http_client;

/// Fetch hook with loading/success/error tracking.
///
/// - With a non-empty `initial_url` the hook fetches after the first render,
///   and again whenever `initial_url` changes. The first render is already
///   in the loading state.
/// - The returned callback fetches the given URL, or the initial URL on
///   `None`. Failures end in `is_error`; the error itself is only logged.
/// - `initial_data` seeds `data` until the first successful fetch.
#[hook]
pub fn use_fetch_state(
    options: FetchStateOptions,
) -> (UseReducerHandle<HookState<Payload>>, Callback<Option<String>>) {
    let state = {
        let initial_url_defined = !options.initial_url.is_empty();
        let initial_data = options.initial_data.clone();
        use_reducer(move || HookState::new(initial_url_defined, initial_data))
    };

    let fetch = {
        let dispatcher = state.dispatcher();
        use_callback(
            options.clone(),
            move |url: Option<String>, options: &FetchStateOptions| {
                let dispatcher = dispatcher.clone();
                let url = url.unwrap_or_else(|| options.initial_url.clone());
                let fetch_options = options.fetch_options.clone();

                yew::platform::spawn_local(async move {
                    let client = get_http_client();
                    run_fetch(&client, &url, &fetch_options, |action| {
                        dispatcher.dispatch(action)
                    })
                    .await;
                });
            },
        )
    };

    // Fetch on mount and when the initial url changes
    {
        let fetch = fetch.clone();
        use_effect_with(options.initial_url, move |initial_url| {
            if !initial_url.is_empty() {
                fetch.emit(None);
            }
        });
    }

    (state, fetch)
}
