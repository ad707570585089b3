//! Canned responses served by the mock backend.
//!
//! | route            | response                                          |
//! |------------------|---------------------------------------------------|
//! | GET /api/items   | 200 `{"items":[1,2,3]}`                           |
//! | POST /api/items  | 201 `{"id":7}`                                    |
//! | /api/text        | 200 `plain text body`                             |
//! | /api/empty       | 204, no body                                      |
//! | /api/broken      | 500 `internal failure`                            |
//! | /api/echo        | 200 with the request body and content type        |
//! | /api/delay       | 200 `{"value":..}` after `?ms=..&value=..`        |
//! | /api/hang        | nothing for [`HANG_DURATION`]                     |
//! | /api/slow-body   | headers at once, body finished after a pause      |
//! | anything else    | 404 `{"error":"not found"}`                       |

use std::convert::Infallible;
use std::time::Duration;

use actix_web::http::Method;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;

use crate::Recorder;

/// How long `/api/hang` holds a request before answering.
pub const HANG_DURATION: Duration = Duration::from_secs(10);
/// Pause between the first and last chunk of `/api/slow-body`.
pub const SLOW_BODY_DELAY: Duration = Duration::from_millis(300);

#[derive(Deserialize)]
struct DelayQuery {
    ms: u64,
    value: String,
}

pub(crate) async fn respond(
    req: HttpRequest,
    body: web::Bytes,
    recorder: web::Data<Recorder>,
) -> HttpResponse {
    recorder.record(&req, &body);

    match req.path() {
        "/api/items" if *req.method() == Method::GET => {
            HttpResponse::Ok().json(json!({"items": [1, 2, 3]}))
        }
        "/api/items" if *req.method() == Method::POST => {
            HttpResponse::Created().json(json!({"id": 7}))
        }
        "/api/text" => HttpResponse::Ok()
            .content_type("text/plain")
            .body("plain text body"),
        "/api/empty" => HttpResponse::NoContent().finish(),
        "/api/broken" => {
            HttpResponse::InternalServerError().body("internal failure")
        }
        "/api/echo" => echo(&req, body),
        "/api/delay" => delay(&req).await,
        "/api/hang" => {
            tokio::time::sleep(HANG_DURATION).await;
            HttpResponse::Ok().json(json!({"late": true}))
        }
        "/api/slow-body" => slow_body(),
        _ => HttpResponse::NotFound().json(json!({"error": "not found"})),
    }
}

fn echo(req: &HttpRequest, body: web::Bytes) -> HttpResponse {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("text/plain")
        .to_string();
    HttpResponse::Ok().content_type(content_type).body(body)
}

async fn delay(req: &HttpRequest) -> HttpResponse {
    match web::Query::<DelayQuery>::from_query(req.query_string()) {
        Ok(query) => {
            tokio::time::sleep(Duration::from_millis(query.ms)).await;
            HttpResponse::Ok().json(json!({"value": query.value}))
        }
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

/// Headers and the first chunk go out immediately, the rest of the JSON
/// array follows after [`SLOW_BODY_DELAY`].
fn slow_body() -> HttpResponse {
    let parts = [("[1,", Duration::ZERO), ("2,3]", SLOW_BODY_DELAY)];
    let chunks = futures::stream::iter(parts).then(|(chunk, pause)| async move {
        tokio::time::sleep(pause).await;
        Ok::<_, Infallible>(web::Bytes::from_static(chunk.as_bytes()))
    });
    HttpResponse::Ok()
        .content_type("application/json")
        .streaming(chunks)
}
