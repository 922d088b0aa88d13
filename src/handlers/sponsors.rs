// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sponsor endpoints. Deleting a sponsor hides it rather than removing it.

use super::{
    body_id, if_present, json_object, nullable, nullable_text, optional, optional_text,
    parse_id, required, AppState, IdQuery, SuccessResponse,
};
use crate::config::Action;
use crate::error::Result;
use crate::models::{NewSponsor, Sponsor, SponsorUpdate};
use crate::validator::{
    validate_boolean, validate_integer, validate_required_text, validate_sponsor_tier,
    validate_url, ValidationError,
};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_SORT_ORDER: i64 = 1000;

fn sponsor_name(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_NAME_LEN)
}

fn sort_order(value: &Value) -> std::result::Result<i64, ValidationError> {
    validate_integer(value, 0, MAX_SORT_ORDER)
}

/// Active sponsors, platinum tier first.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Sponsor>> {
    Json(state.store.list_active_sponsors().await)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Sponsor>)> {
    let client = state.client(&headers, peer.as_ref());
    state.enforce(Action::SponsorCreation, &client).await?;

    let body = json_object(body)?;
    let data = NewSponsor {
        name: required(&body, "name", sponsor_name)?,
        website: optional(&body, "website", validate_url)?,
        tier: required(&body, "tier", validate_sponsor_tier)?,
        logo_url: optional(&body, "logoUrl", validate_url)?,
        description: optional_text(&body, "description", MAX_DESCRIPTION_LEN)?,
        sort_order: optional(&body, "sortOrder", sort_order)?.unwrap_or(0),
    };

    let sponsor = state.store.create_sponsor(data).await;
    info!(id = %sponsor.id, tier = ?sponsor.tier, "Sponsor created");
    Ok((StatusCode::CREATED, Json(sponsor)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Sponsor>> {
    let body = json_object(body)?;
    let id = body_id(&body)?;
    let update = SponsorUpdate {
        name: if_present(&body, "name", sponsor_name)?,
        website: nullable(&body, "website", validate_url)?,
        tier: if_present(&body, "tier", validate_sponsor_tier)?,
        logo_url: nullable(&body, "logoUrl", validate_url)?,
        description: nullable_text(&body, "description", MAX_DESCRIPTION_LEN)?,
        sort_order: if_present(&body, "sortOrder", sort_order)?,
        is_active: if_present(&body, "isActive", validate_boolean)?,
    };

    let sponsor = state.store.update_sponsor(id, update).await?;
    info!(id = %sponsor.id, "Sponsor updated");
    Ok(Json(sponsor))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_id(query.id.as_deref())?;
    state.store.deactivate_sponsor(id).await?;
    info!(id = %id, "Sponsor deactivated");
    Ok(SuccessResponse::ok())
}
