// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the registration service.
//!
//! Every mutating handler follows the same order: rate limit gate for the
//! calling client, then validation of each field, then the store call.

pub mod auth;
pub mod content;
pub mod participants;
pub mod settings;
pub mod sponsors;
pub mod volunteers;

use crate::config::{Action, Config};
use crate::error::{AppError, Result};
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::store::Store;
use crate::validator::{sanitize_string, ValidationError};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo},
    http::{HeaderMap, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub store: Store,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            limiter: RateLimiter::new(),
            store: Store::new(),
            config,
        }
    }

    /// Rate limit identity of the caller.
    pub fn client(&self, headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> String {
        client_ip(headers, peer, &self.config.trusted_proxies)
    }

    /// Count a request for `action` from `client`, failing once its policy is exhausted.
    pub async fn enforce(&self, action: Action, client: &str) -> Result<()> {
        let policy = self.config.rate_limit.policy(action);
        let key = action.key(client);

        match self
            .limiter
            .check(&key, policy.max_requests, policy.window())
            .await
        {
            RateLimitResult::Allowed { remaining, .. } => {
                debug!(%action, client, remaining, "Request within rate limit");
                Ok(())
            }
            RateLimitResult::Limited { retry_after } => {
                info!(
                    %action,
                    client,
                    retry_after_secs = retry_after.as_secs(),
                    "Request rate limited"
                );
                Err(AppError::RateLimited {
                    action,
                    retry_after,
                })
            }
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Body returned by delete and login endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// `?id=` query used by delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "event-registration",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route(
            "/api/participants",
            get(participants::list)
                .post(participants::create)
                .put(participants::update)
                .delete(participants::remove),
        )
        .route(
            "/api/volunteers",
            get(volunteers::list)
                .post(volunteers::create)
                .put(volunteers::update)
                .delete(volunteers::remove),
        )
        .route(
            "/api/sponsors",
            get(sponsors::list)
                .post(sponsors::create)
                .put(sponsors::update)
                .delete(sponsors::remove),
        )
        .route(
            "/api/content",
            get(content::get)
                .post(content::create)
                .put(content::update)
                .delete(content::remove),
        )
        .route("/api/settings", get(settings::get).put(settings::update))
        .route("/api/admin/auth", post(auth::login))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Identify the caller for rate limiting.
///
/// The socket peer is the client unless it is one of `trusted_proxies`. Behind
/// a trusted proxy the `X-Forwarded-For` chain is walked from the right and the
/// first hop that is not itself a trusted proxy wins; entries to its left are
/// client-supplied and ignored. `X-Real-IP` is consulted only when the chain
/// yields nothing.
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<&ConnectInfo<SocketAddr>>,
    trusted_proxies: &[IpAddr],
) -> String {
    let Some(ConnectInfo(addr)) = peer else {
        return "unknown".to_string();
    };
    let peer_ip = addr.ip();
    if !trusted_proxies.contains(&peer_ip) {
        return peer_ip.to_string();
    }

    let chain = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    for hop in chain.rsplit(',') {
        match hop.trim().parse::<IpAddr>() {
            Ok(ip) if trusted_proxies.contains(&ip) => continue,
            Ok(ip) => return ip.to_string(),
            Err(_) => break,
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
        .unwrap_or(peer_ip)
        .to_string()
}

/// Unwrap a JSON body, which must be an object.
pub(crate) fn json_object(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    match body {
        Ok(Json(value)) if value.is_object() => Ok(value),
        Ok(Json(_)) => Err(AppError::InvalidBody("body is not a JSON object".to_string())),
        Err(rejection) => Err(AppError::InvalidBody(rejection.body_text())),
    }
}

static NULL: Value = Value::Null;

fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_str().is_some_and(|s| s.trim().is_empty())
}

/// Apply `rule` to a required field. A missing field is validated as null.
pub(crate) fn required<T>(
    body: &Value,
    key: &'static str,
    rule: impl FnOnce(&Value) -> std::result::Result<T, ValidationError>,
) -> Result<T> {
    rule(body.get(key).unwrap_or(&NULL)).map_err(AppError::invalid(key))
}

/// Apply `rule` only when the field is present and not null.
pub(crate) fn if_present<T>(
    body: &Value,
    key: &'static str,
    rule: impl FnOnce(&Value) -> std::result::Result<T, ValidationError>,
) -> Result<Option<T>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => rule(value).map(Some).map_err(AppError::invalid(key)),
    }
}

/// Apply `rule` to an optional field; absent, null and blank strings mean no value.
pub(crate) fn optional<T>(
    body: &Value,
    key: &'static str,
    rule: impl FnOnce(&Value) -> std::result::Result<T, ValidationError>,
) -> Result<Option<T>> {
    match body.get(key) {
        Some(value) if !is_blank(value) => rule(value).map(Some).map_err(AppError::invalid(key)),
        _ => Ok(None),
    }
}

/// Sanitized optional free text.
pub(crate) fn optional_text(body: &Value, key: &'static str, max_length: usize) -> Result<Option<String>> {
    Ok(optional(body, key, |v| sanitize_string(v, max_length))?.filter(|s| !s.is_empty()))
}

/// Update of an optional field: absent leaves it alone, null or blank clears it.
pub(crate) fn nullable<T>(
    body: &Value,
    key: &'static str,
    rule: impl FnOnce(&Value) -> std::result::Result<T, ValidationError>,
) -> Result<Option<Option<T>>> {
    if body.get(key).is_none() {
        return Ok(None);
    }
    optional(body, key, rule).map(Some)
}

pub(crate) fn nullable_text(
    body: &Value,
    key: &'static str,
    max_length: usize,
) -> Result<Option<Option<String>>> {
    if body.get(key).is_none() {
        return Ok(None);
    }
    optional_text(body, key, max_length).map(Some)
}

/// Parse a record id from a body field or query parameter.
pub(crate) fn parse_id(raw: Option<&str>) -> Result<Uuid> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(AppError::MissingId)?;
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Record id carried in an update body.
pub(crate) fn body_id(body: &Value) -> Result<Uuid> {
    parse_id(body.get("id").and_then(Value::as_str))
}
