use http_helpers::controller::run_send;
use http_helpers::{HookState, Payload, SendRequest, SendStateOptions};
use yew::prelude::*;

use crate::get_http_client;

/// Send hook with loading/success/error tracking.
///
/// - With a non-empty `initial_url` the hook sends `initial_send_data` with
///   `initial_send_options` after the first render, and again whenever
///   `initial_url` changes.
/// - The returned callback takes a [`SendRequest`]; any field left unset
///   falls back to the matching initial value.
/// - `initial_received_data` seeds `data`, like the initial value of
///   `use_state`.
///
/// ```ignore
/// let (state, send) = use_send_state(SendStateOptions::default());
/// let onclick = move |_| {
///     send.emit(SendRequest::to("/api/items").with_data(json!({"name": "x"})))
/// };
/// ```
#[hook]
pub fn use_send_state(
    options: SendStateOptions,
) -> (UseReducerHandle<HookState<Payload>>, Callback<SendRequest>) {
    let state = {
        let initial_url_defined = !options.initial_url.is_empty();
        let initial_data = options.initial_received_data.clone();
        use_reducer(move || HookState::new(initial_url_defined, initial_data))
    };

    let send = {
        let dispatcher = state.dispatcher();
        use_callback(
            options.clone(),
            move |request: SendRequest, options: &SendStateOptions| {
                let dispatcher = dispatcher.clone();
                let (url, data, send_options) = request.resolve(options);

                yew::platform::spawn_local(async move {
                    let client = get_http_client();
                    run_send(
                        &client,
                        &url,
                        data.as_ref(),
                        &send_options,
                        |action| dispatcher.dispatch(action),
                    )
                    .await;
                });
            },
        )
    };

    {
        let send = send.clone();
        use_effect_with(options.initial_url, move |initial_url| {
            if !initial_url.is_empty() {
                send.emit(SendRequest::default());
            }
        });
    }

    (state, send)
}
