use std::time::Duration;

use http_helpers::{
    FetchController, FetchOptions, FetchStateOptions, HookState, Payload,
    Phase, SendController, SendRequest, SendStateOptions,
};
use serde_json::json;
use test_helpers::spawn_app;

#[tokio::test]
async fn fetch_on_mount() {
    let app = spawn_app().await;
    let controller = FetchController::new(
        app.client.clone(),
        FetchStateOptions {
            initial_url: "/api/items".into(),
            ..FetchStateOptions::default()
        },
    );

    // loading from the first render, before the request goes out
    assert_eq!(controller.state().phase(), Phase::Loading);

    controller.mount().await;

    assert_eq!(
        controller.state(),
        HookState {
            is_loading: false,
            is_success: true,
            is_error: false,
            data: Some(Payload::Json(json!({"items": [1, 2, 3]}))),
        }
    );
    assert_eq!(app.recorder.count("/api/items"), 1);
    assert_eq!(app.recorder.last().unwrap().method, "GET");
}

#[tokio::test]
async fn no_initial_url_stays_idle() {
    let app = spawn_app().await;
    let controller = FetchController::new(
        app.client.clone(),
        FetchStateOptions {
            initial_data: Some(Payload::Json(json!([]))),
            ..FetchStateOptions::default()
        },
    );

    controller.mount().await;

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.data, Some(Payload::Json(json!([]))));
    assert!(app.recorder.requests().is_empty());
}

#[tokio::test]
async fn latest_fetch_wins() {
    let app = spawn_app().await;
    let controller =
        FetchController::new(app.client.clone(), FetchStateOptions::default());

    controller.fetch(Some("/api/delay?ms=0&value=a")).await;
    controller.fetch(Some("/api/delay?ms=0&value=b")).await;

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Success);
    assert_eq!(state.data, Some(Payload::Json(json!({"value": "b"}))));
}

#[tokio::test]
async fn failure_keeps_previous_data() {
    let app = spawn_app().await;
    let controller = FetchController::new(
        app.client.clone(),
        FetchStateOptions {
            initial_url: "/api/items".into(),
            ..FetchStateOptions::default()
        },
    );
    controller.mount().await;

    controller.fetch(Some("/api/missing")).await;

    let state = controller.state();
    assert!(state.is_error);
    assert!(!state.is_loading && !state.is_success);
    assert_eq!(state.data, Some(Payload::Json(json!({"items": [1, 2, 3]}))));

    // fetching the initial url again recovers
    controller.fetch(None).await;
    assert_eq!(controller.state().phase(), Phase::Success);
    assert_eq!(app.recorder.count("/api/items"), 2);
}

#[tokio::test]
async fn only_loading_while_in_flight() {
    let app = spawn_app().await;
    let controller = FetchController::new(
        app.client.clone(),
        FetchStateOptions {
            initial_data: Some(Payload::Text("seed".into())),
            ..FetchStateOptions::default()
        },
    );

    let (_, in_flight) = tokio::join!(
        controller.fetch(Some("/api/delay?ms=300&value=x")),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            controller.state()
        }
    );

    assert_eq!(
        in_flight,
        HookState {
            is_loading: true,
            is_success: false,
            is_error: false,
            data: Some(Payload::Text("seed".into())),
        }
    );
    assert_eq!(
        controller.state().data,
        Some(Payload::Json(json!({"value": "x"})))
    );
}

#[tokio::test]
async fn slower_earlier_call_settles_last() {
    let app = spawn_app().await;
    let controller =
        FetchController::new(app.client.clone(), FetchStateOptions::default());

    tokio::join!(
        controller.fetch(Some("/api/delay?ms=400&value=first")),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            controller.fetch(Some("/api/delay?ms=0&value=second")).await;
        }
    );

    // no request fencing: the stale response overwrites the newer one
    assert_eq!(
        controller.state().data,
        Some(Payload::Json(json!({"value": "first"})))
    );
}

#[tokio::test]
async fn fetch_timeout_ends_in_error() {
    let app = spawn_app().await;
    let controller = FetchController::new(
        app.client.clone(),
        FetchStateOptions {
            fetch_options: FetchOptions::default()
                .with_timeout(Duration::from_millis(50)),
            ..FetchStateOptions::default()
        },
    );

    controller.fetch(Some("/api/hang")).await;

    let state = controller.state();
    assert!(state.is_error);
    assert!(!state.is_loading);
    assert_eq!(state.data, None);
}

#[tokio::test]
async fn send_on_demand() {
    let app = spawn_app().await;
    let controller =
        SendController::new(app.client.clone(), SendStateOptions::default());
    assert_eq!(controller.state().phase(), Phase::Idle);

    controller
        .send(SendRequest::to("/api/items").with_data(json!({"name": "x"})))
        .await;

    let state = controller.state();
    assert!(!state.is_loading && state.is_success && !state.is_error);
    assert_eq!(state.data, Some(Payload::Json(json!({"id": 7}))));
    assert_eq!(app.recorder.last().unwrap().body, r#"{"name":"x"}"#);
}

#[tokio::test]
async fn send_on_mount_uses_initial_values() {
    let app = spawn_app().await;
    let controller = SendController::new(
        app.client.clone(),
        SendStateOptions {
            initial_url: "/api/echo".into(),
            initial_received_data: Some(Payload::Text("before".into())),
            ..SendStateOptions::default()
        },
    );
    assert_eq!(controller.state().phase(), Phase::Loading);
    assert_eq!(
        controller.state().data,
        Some(Payload::Text("before".into()))
    );

    controller.mount().await;

    // the default send data is an empty object
    assert_eq!(app.recorder.last().unwrap().body, "{}");
    assert_eq!(controller.state().data, Some(Payload::Json(json!({}))));
    assert_eq!(controller.state().phase(), Phase::Success);
}

#[tokio::test]
async fn send_failure_ends_in_error() {
    let app = spawn_app().await;
    let controller =
        SendController::new(app.client.clone(), SendStateOptions::default());

    controller.send(SendRequest::to("/api/broken")).await;

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.data, None);
}
