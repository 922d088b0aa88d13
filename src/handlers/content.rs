// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Editable page content blocks.

use super::{
    body_id, if_present, json_object, optional, parse_id, required, AppState, IdQuery,
    SuccessResponse,
};
use crate::config::Action;
use crate::error::Result;
use crate::models::{ContentBlock, ContentBlockUpdate, NewContentBlock};
use crate::validator::{
    sanitize_str, validate_boolean, validate_content_type, validate_integer,
    validate_required_text, ValidationError,
};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const MAX_KEY_LEN: usize = 50;
const MAX_TITLE_LEN: usize = 200;
const MAX_BODY_LEN: usize = 10_000;
const MAX_SORT_ORDER: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

fn block_key(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_KEY_LEN)
}

fn title(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_TITLE_LEN)
}

fn block_body(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_BODY_LEN)
}

fn sort_order(value: &Value) -> std::result::Result<i64, ValidationError> {
    validate_integer(value, 0, MAX_SORT_ORDER)
}

/// One block by `?key=` (null when absent), or every active block.
pub async fn get(State(state): State<Arc<AppState>>, Query(query): Query<KeyQuery>) -> Response {
    match query.key {
        Some(key) => {
            let key = sanitize_str(&key, MAX_KEY_LEN);
            Json(state.store.content_by_key(&key).await).into_response()
        }
        None => Json(state.store.list_active_content().await).into_response(),
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContentBlock>)> {
    let client = state.client(&headers, peer.as_ref());
    state.enforce(Action::ContentCreation, &client).await?;

    let body = json_object(body)?;
    let data = NewContentBlock {
        key: required(&body, "key", block_key)?,
        title: required(&body, "title", title)?,
        content: required(&body, "content", block_body)?,
        content_type: optional(&body, "contentType", validate_content_type)?.unwrap_or_default(),
        sort_order: optional(&body, "sortOrder", sort_order)?.unwrap_or(0),
    };

    let block = state.store.create_content(data).await?;
    info!(id = %block.id, key = %block.key, "Content block created");
    Ok((StatusCode::CREATED, Json(block)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContentBlock>> {
    let body = json_object(body)?;
    let id = body_id(&body)?;
    let update = ContentBlockUpdate {
        key: if_present(&body, "key", block_key)?,
        title: if_present(&body, "title", title)?,
        content: if_present(&body, "content", block_body)?,
        content_type: if_present(&body, "contentType", validate_content_type)?,
        sort_order: if_present(&body, "sortOrder", sort_order)?,
        is_active: if_present(&body, "isActive", validate_boolean)?,
    };

    let block = state.store.update_content(id, update).await?;
    info!(id = %block.id, key = %block.key, "Content block updated");
    Ok(Json(block))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_id(query.id.as_deref())?;
    state.store.delete_content(id).await?;
    info!(id = %id, "Content block deleted");
    Ok(SuccessResponse::ok())
}
