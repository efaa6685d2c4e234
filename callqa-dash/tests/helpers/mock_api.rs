//! Mock analysis API
//!
//! An axum server on an ephemeral localhost port serving canned responses by
//! request path. Unknown paths answer 404; every request path is recorded.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(u16),
    Text(String),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn handle(State(state): State<MockState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(path.clone());

    let Some(route) = state.routes.get(&path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }
    match &route.reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Status(code) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Text(body) => body.clone().into_response(),
    }
}

/// Builder for a [`MockApi`]
#[derive(Default)]
pub struct MockApiBuilder {
    routes: HashMap<String, Route>,
}

impl MockApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, path: &str, reply: Reply) -> Self {
        self.routes
            .insert(path.to_string(), Route { reply, delay: None });
        self
    }

    /// Serve JSON at `path` (as it appears on the wire, percent-encoded)
    pub fn json(self, path: &str, value: Value) -> Self {
        self.route(path, Reply::Json(value))
    }

    pub fn status(self, path: &str, code: u16) -> Self {
        self.route(path, Reply::Status(code))
    }

    /// Serve a non-JSON body with status 200
    pub fn text(self, path: &str, body: &str) -> Self {
        self.route(path, Reply::Text(body.to_string()))
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(path) {
            route.delay = Some(delay);
        }
        self
    }

    /// Bind to 127.0.0.1:0 and serve in the background
    pub async fn spawn(self) -> MockApi {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            routes: Arc::new(self.routes),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base_url: format!("http://{}", addr),
            requests,
        }
    }
}

/// Running mock API
pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
