//! Test helper utilities for webserver integration tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; no socket is
//! ever bound.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use engine::{EngineConfig, InMemoryStore, StoreGateway, TimetableEngine};
use shared::Snapshot;
use webserver::WebServer;

/// Address recorded in the server state; tests never bind it
pub fn test_address() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

pub fn parse_school(school: Value) -> Snapshot {
    serde_json::from_value(school).expect("fixture school should deserialize")
}

/// A webserver plus its router, ready for in-process requests
pub struct TestServer<G: StoreGateway + 'static = InMemoryStore> {
    pub server: WebServer<G>,
    router: Router,
}

impl TestServer<InMemoryStore> {
    /// Permissive server over an in-memory copy of `school`
    pub async fn with_school(school: Value) -> Self {
        Self::with_config(school, EngineConfig::default()).await
    }

    pub async fn strict(school: Value) -> Self {
        Self::with_config(school, EngineConfig::strict()).await
    }

    async fn with_config(school: Value, config: EngineConfig) -> Self {
        let gateway = InMemoryStore::with_snapshot(parse_school(school));
        let engine = TimetableEngine::open(gateway, config).await.unwrap();
        Self::from_server(WebServer::new(test_address(), engine))
    }
}

impl<G: StoreGateway + 'static> TestServer<G> {
    pub fn from_server(server: WebServer<G>) -> Self {
        let router = server.build_router();
        Self { server, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a JSON request and decode the JSON answer (`Null` for an empty body)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Error code of an API error body
pub fn error_code(body: &Value) -> &str {
    body["code"].as_str().unwrap_or_default()
}
