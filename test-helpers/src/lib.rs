pub mod mock;

use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};

use actix_web::{App, HttpRequest, HttpServer, web};
use http_helpers::{FixedCsrf, HttpClient, RequestError};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Token the test client attaches to send requests.
pub const CSRF_TOKEN: &str = "test-csrf-token";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub address: String,
    /// Client for the mock backend, carrying [`CSRF_TOKEN`].
    pub client: HttpClient,
    pub recorder: Recorder,
}

impl TestApp {
    /// Absolute URL of `path` on the mock backend.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }
}

/// A request as the mock backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Every request the mock backend has seen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn record(&self, req: &HttpRequest, body: &[u8]) {
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            headers: req
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect(),
            body: String::from_utf8_lossy(body).into_owned(),
        };
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }
}

/// Install a stderr subscriber for tests. Safe to call from every test; the
/// filter defaults to `error` and can be raised with `RUST_LOG`.
pub fn init_test_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Start the mock backend on an OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    init_test_logging();

    let recorder = Recorder::default();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let data = web::Data::new(recorder.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(mock::respond))
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    tokio::spawn(server);
    tracing::debug!(port, "Mock backend listening");

    let address = format!("http://127.0.0.1:{port}");
    TestApp {
        port,
        client: HttpClient::new(address.clone())
            .with_csrf(FixedCsrf(CSRF_TOKEN.into())),
        address,
        recorder,
    }
}

/// Address of a port nothing is listening on.
pub fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Assert that a request failed with a specific status code.
pub fn assert_status_code<T: std::fmt::Debug>(
    result: Result<T, RequestError>,
    expected: u16,
) {
    match result {
        Err(e) => assert_eq!(e.status, expected),
        Ok(payload) => panic!("Expected RequestError, got {payload:?}"),
    };
}
