// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tournament registration endpoints.

use super::{
    body_id, if_present, json_object, nullable_text, optional_text, parse_id, required,
    AppState, IdQuery, SuccessResponse,
};
use crate::config::Action;
use crate::error::Result;
use crate::models::{NewParticipant, Participant, ParticipantUpdate};
use crate::validator::{
    validate_boolean, validate_email, validate_name, validate_phone, validate_skill_level,
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

const MAX_DIETARY_LEN: usize = 500;

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Participant>> {
    Json(state.store.list_participants().await)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Participant>)> {
    let client = state.client(&headers, peer.as_ref());
    state
        .enforce(Action::ParticipantRegistration, &client)
        .await?;

    let body = json_object(body)?;
    let data = NewParticipant {
        first_name: required(&body, "firstName", validate_name)?,
        last_name: required(&body, "lastName", validate_name)?,
        email: required(&body, "email", validate_email)?,
        phone: required(&body, "phone", validate_phone)?,
        skill_level: required(&body, "skillLevel", validate_skill_level)?,
        dietary_restrictions: optional_text(&body, "dietaryRestrictions", MAX_DIETARY_LEN)?,
    };

    let participant = state.store.create_participant(data).await?;
    info!(id = %participant.id, client = %client, "Participant registered");
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Participant>> {
    let body = json_object(body)?;
    let id = body_id(&body)?;
    let update = ParticipantUpdate {
        first_name: if_present(&body, "firstName", validate_name)?,
        last_name: if_present(&body, "lastName", validate_name)?,
        email: if_present(&body, "email", validate_email)?,
        phone: if_present(&body, "phone", validate_phone)?,
        skill_level: if_present(&body, "skillLevel", validate_skill_level)?,
        dietary_restrictions: nullable_text(&body, "dietaryRestrictions", MAX_DIETARY_LEN)?,
        donation_completed: if_present(&body, "donationCompleted", validate_boolean)?,
    };

    let participant = state.store.update_participant(id, update).await?;
    info!(id = %participant.id, "Participant updated");
    Ok(Json(participant))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_id(query.id.as_deref())?;
    state.store.delete_participant(id).await?;
    info!(id = %id, "Participant deleted");
    Ok(SuccessResponse::ok())
}
