//! An in-process stand-in for the crawling service.
//! It records every request it receives and answers via a canned responder.
#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::sync::{Arc, Mutex};

/// A single request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// The path alongside its query string, e.g. `/api/orgs/1/uploads/stream?name=a`.
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or_default()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Everything received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

/// The login response every stub hands out unless told otherwise.
pub const LOGIN_BODY: &str = r#"{"token_type": "Bearer", "access_token": "xyz"}"#;

/// Answers logins with [`LOGIN_BODY`] and everything else with an echo of the request.
pub fn default_responder(request: &RecordedRequest) -> (StatusCode, String) {
    if request.path() == "/api/auth/jwt/login" {
        return (StatusCode::OK, LOGIN_BODY.to_string());
    }
    let echo = serde_json::json!({
        "method": request.method.as_str(),
        "uri": request.uri,
    });
    (StatusCode::OK, echo.to_string())
}

pub async fn spawn() -> StubServer {
    spawn_with(default_responder).await
}

pub async fn spawn_with<F>(responder: F) -> StubServer
where
    F: Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        requests: requests.clone(),
        responder: Arc::new(responder),
    };
    let app = Router::new().fallback(record).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should be able to bind stub server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        method,
        uri: uri
            .path_and_query()
            .map(|path| path.as_str().to_string())
            .unwrap_or_default(),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body: body.to_vec(),
    };

    let (status, body) = (state.responder)(&request);
    state.requests.lock().unwrap().push(request);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
