// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Admin login.
//!
//! Credentials are compared against the static pair in [`AdminConfig`].
//! Any mismatch produces the same "Invalid credentials" response, so the
//! caller cannot tell whether the username or the password was wrong.
//!
//! [`AdminConfig`]: crate::config::AdminConfig

use super::{json_object, AppState, SuccessResponse};
use crate::config::Action;
use crate::error::{AppError, Result};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let client = state.client(&headers, peer.as_ref());
    state.enforce(Action::AdminLogin, &client).await?;

    let body = json_object(body)?;
    let username = body.get("username").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);

    let admin = &state.config.admin;
    match (username, password) {
        (Some(u), Some(p)) if u == admin.username && p == admin.password => {
            info!(client = %client, "Admin logged in");
            Ok(SuccessResponse::ok())
        }
        _ => Err(AppError::InvalidCredentials),
    }
}
