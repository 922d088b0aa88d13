// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for driving the registration router in-process.

#![allow(dead_code)]

pub mod payloads;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use event_registration::{
    config::Config,
    handlers::{router, AppState},
};
use serde_json::Value;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower::ServiceExt;

/// Router plus a handle on its state for direct assertions.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Response status, headers and parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of a failure body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let state = Arc::new(AppState::new(config));
        Self {
            router: router(state.clone()),
            state,
        }
    }

    /// Send a request from the socket peer at `ip`.
    pub async fn send(&self, method: Method, uri: &str, ip: &str, body: Option<Value>) -> TestResponse {
        self.send_with_headers(method, uri, ip, &[], body).await
    }

    /// Send a request from the socket peer at `ip` carrying extra headers,
    /// e.g. `X-Forwarded-For` as set by a proxy or forged by a client.
    pub async fn send_with_headers(
        &self,
        method: Method,
        uri: &str,
        ip: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let mut request = builder.body(body).unwrap();
        request.extensions_mut().insert(peer(ip));
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, "127.0.0.1", None).await
    }

    pub async fn post(&self, uri: &str, ip: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, ip, Some(body)).await
    }

    pub async fn put(&self, uri: &str, ip: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, ip, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, "127.0.0.1", None).await
    }

    /// POST from `ip` with an `X-Forwarded-For` header.
    pub async fn post_forwarded(&self, uri: &str, ip: &str, forwarded_for: &str, body: Value) -> TestResponse {
        self.send_with_headers(
            Method::POST,
            uri,
            ip,
            &[("x-forwarded-for", forwarded_for)],
            Some(body),
        )
        .await
    }
}

/// Connection info as axum records it for a TCP peer.
pub fn peer(ip: &str) -> ConnectInfo<SocketAddr> {
    let ip: IpAddr = ip.parse().unwrap();
    ConnectInfo(SocketAddr::new(ip, 40_000))
}
