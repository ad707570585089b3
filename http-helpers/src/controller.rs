//! Request state outside of any UI framework.
//!
//! [`run_fetch`] and [`run_send`] drive one request through the reducer and
//! are what both the controllers here and the yew hooks are built on. The
//! controllers keep their state behind a mutex; concurrent calls are not
//! fenced, so whichever settles last wins.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Value, json};

use crate::{
    FetchOptions, HookState, HttpClient, Payload, RequestAction, SendOptions,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchStateOptions {
    /// Requested on mount when non-empty, and the default target of later
    /// calls.
    pub initial_url: String,
    pub initial_data: Option<Payload>,
    pub fetch_options: FetchOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStateOptions {
    /// Sent to on mount when non-empty, and the default target of later
    /// calls.
    pub initial_url: String,
    pub initial_send_data: Option<Value>,
    pub initial_send_options: SendOptions,
    pub initial_received_data: Option<Payload>,
}

impl Default for SendStateOptions {
    fn default() -> Self {
        Self {
            initial_url: String::new(),
            initial_send_data: Some(json!({})),
            initial_send_options: SendOptions::default(),
            initial_received_data: None,
        }
    }
}

/// One call of a send wrapper. Unset fields fall back to the wrapper's
/// initial values; `data: Some(Value::Null)` sends no body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendRequest {
    pub url: Option<String>,
    pub data: Option<Value>,
    pub options: Option<SendOptions>,
}

impl SendRequest {
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Fill unset fields from `defaults`.
    pub fn resolve(
        self,
        defaults: &SendStateOptions,
    ) -> (String, Option<Value>, SendOptions) {
        (
            self.url.unwrap_or_else(|| defaults.initial_url.clone()),
            self.data.or_else(|| defaults.initial_send_data.clone()),
            self.options
                .unwrap_or_else(|| defaults.initial_send_options.clone()),
        )
    }
}

/// Fetch `url`, reporting the lifecycle through `dispatch`. Failures end in
/// [`RequestAction::Failure`] and are not returned.
pub async fn run_fetch(
    client: &HttpClient,
    url: &str,
    options: &FetchOptions,
    dispatch: impl Fn(RequestAction<Payload>),
) {
    dispatch(RequestAction::Init);
    match client.fetch(url, options).await {
        Ok(payload) => dispatch(RequestAction::Success(payload)),
        Err(e) => {
            tracing::warn!(url, "Fetch ended in error state: {e}");
            dispatch(RequestAction::Failure);
        }
    }
}

/// Send to `url`, reporting the lifecycle through `dispatch`.
pub async fn run_send(
    client: &HttpClient,
    url: &str,
    data: Option<&Value>,
    options: &SendOptions,
    dispatch: impl Fn(RequestAction<Payload>),
) {
    dispatch(RequestAction::Init);
    match client.send(url, data, options).await {
        Ok(payload) => dispatch(RequestAction::Success(payload)),
        Err(e) => {
            tracing::warn!(url, "Send ended in error state: {e}");
            dispatch(RequestAction::Failure);
        }
    }
}

/// Shared state mutated only through the reducer.
#[derive(Debug)]
struct StateCell<T> {
    inner: Arc<Mutex<HookState<T>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> StateCell<T> {
    fn new(state: HookState<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn dispatch(&self, action: RequestAction<T>) {
        let mut state =
            self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *state = std::mem::take(&mut *state).apply(action);
    }

    fn snapshot(&self) -> HookState<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Fetch wrapper with loading/success/error tracking.
#[derive(Debug, Clone)]
pub struct FetchController {
    client: HttpClient,
    options: FetchStateOptions,
    state: StateCell<Payload>,
}

impl FetchController {
    pub fn new(client: HttpClient, options: FetchStateOptions) -> Self {
        let state = StateCell::new(HookState::new(
            !options.initial_url.is_empty(),
            options.initial_data.clone(),
        ));
        Self {
            client,
            options,
            state,
        }
    }

    pub fn state(&self) -> HookState<Payload> {
        self.state.snapshot()
    }

    /// Issue the initial request, if there is an initial URL.
    pub async fn mount(&self) {
        if !self.options.initial_url.is_empty() {
            self.fetch(None).await;
        }
    }

    /// Fetch `url`, or the initial URL when `None`.
    pub async fn fetch(&self, url: Option<&str>) {
        let url = url.unwrap_or(&self.options.initial_url);
        run_fetch(&self.client, url, &self.options.fetch_options, |action| {
            self.state.dispatch(action)
        })
        .await;
    }
}

/// Send wrapper with loading/success/error tracking.
#[derive(Debug, Clone)]
pub struct SendController {
    client: HttpClient,
    options: SendStateOptions,
    state: StateCell<Payload>,
}

impl SendController {
    pub fn new(client: HttpClient, options: SendStateOptions) -> Self {
        let state = StateCell::new(HookState::new(
            !options.initial_url.is_empty(),
            options.initial_received_data.clone(),
        ));
        Self {
            client,
            options,
            state,
        }
    }

    pub fn state(&self) -> HookState<Payload> {
        self.state.snapshot()
    }

    /// Send the initial data to the initial URL, if there is one.
    pub async fn mount(&self) {
        if !self.options.initial_url.is_empty() {
            self.send(SendRequest::default()).await;
        }
    }

    pub async fn send(&self, request: SendRequest) {
        let (url, data, options) = request.resolve(&self.options);
        run_send(&self.client, &url, data.as_ref(), &options, |action| {
            self.state.dispatch(action)
        })
        .await;
    }
}
