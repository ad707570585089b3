use http_helpers::csrf::CSRF_HEADER;
use http_helpers::{HttpClient, NoCsrf, Payload, SendOptions};
use reqwest::Method;
use serde_json::{Value, json};
use test_helpers::{CSRF_TOKEN, assert_status_code, closed_address, spawn_app};

#[tokio::test]
async fn send_json_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let payload = app
        .client
        .send(
            "/api/items",
            Some(&json!({"name": "x"})),
            &SendOptions::default(),
        )
        .await?;
    assert_eq!(payload, Payload::Json(json!({"id": 7})));

    let request = app.recorder.last().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.body, r#"{"name":"x"}"#);
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header(CSRF_HEADER), Some(CSRF_TOKEN));

    Ok(())
}

#[tokio::test]
async fn non_json_success_resolves_with_text() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let payload = app
        .client
        .send("/api/text", None, &SendOptions::default())
        .await?;
    assert_eq!(payload, Payload::Text("plain text body".into()));

    let payload = app
        .client
        .send("/api/empty", None, &SendOptions::default())
        .await?;
    assert_eq!(payload, Payload::Text(String::new()));

    Ok(())
}

#[tokio::test]
async fn missing_token_is_omitted() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = app.client.clone().with_csrf(NoCsrf);

    client
        .send("/api/items", Some(&json!({})), &SendOptions::default())
        .await?;
    let request = app.recorder.last().unwrap();
    assert_eq!(request.header(CSRF_HEADER), None);

    Ok(())
}

#[tokio::test]
async fn csrf_can_be_turned_off() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let options = SendOptions {
        with_csrf: false,
        ..SendOptions::default()
    };
    app.client.send("/api/items", None, &options).await?;
    let request = app.recorder.last().unwrap();
    assert_eq!(request.header(CSRF_HEADER), None);

    Ok(())
}

#[tokio::test]
async fn absent_or_null_data_sends_no_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client
        .send("/api/echo", None, &SendOptions::default())
        .await?;
    assert_eq!(app.recorder.last().unwrap().body, "");

    let payload = app
        .client
        .send("/api/echo", Some(&Value::Null), &SendOptions::default())
        .await?;
    assert_eq!(app.recorder.last().unwrap().body, "");
    assert_eq!(payload, Payload::Text(String::new()));

    Ok(())
}

#[tokio::test]
async fn method_and_content_type_are_configurable() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let options = SendOptions::default()
        .with_method(Method::PUT)
        .with_content_type("application/merge-patch+json");
    let payload = app
        .client
        .send("/api/echo", Some(&json!({"a": 1})), &options)
        .await?;
    assert_eq!(payload.decode::<Value>()?, json!({"a": 1}));

    let request = app.recorder.last().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(
        request.header("content-type"),
        Some("application/merge-patch+json")
    );

    Ok(())
}

#[tokio::test]
async fn send_error_status_keeps_response() {
    let app = spawn_app().await;

    let error = app
        .client
        .send("/api/broken", Some(&json!({})), &SendOptions::default())
        .await
        .unwrap_err();
    assert_eq!(error.status, 500);
    assert_eq!(error.status_text, "Internal Server Error");
    assert_eq!(error.response, Some(Payload::Text("internal failure".into())));

    let result = app
        .client
        .send("/api/missing", None, &SendOptions::default())
        .await;
    assert_status_code(result, 404);
}

#[tokio::test]
async fn send_transport_failure() {
    let client = HttpClient::new(closed_address());

    let error = client
        .send("/api/items", Some(&json!({})), &SendOptions::default())
        .await
        .unwrap_err();
    assert_eq!(error.status, 0);
    assert_eq!(error.status_text, "");
    assert_eq!(error.response, None);
}
