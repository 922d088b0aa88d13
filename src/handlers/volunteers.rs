// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Volunteer sign-up endpoints.

use super::{
    body_id, if_present, json_object, nullable_text, optional_text, parse_id, required,
    AppState, IdQuery, SuccessResponse,
};
use crate::config::Action;
use crate::error::Result;
use crate::models::{NewVolunteer, Volunteer, VolunteerUpdate};
use crate::validator::{
    validate_array, validate_email, validate_name, validate_phone, ValidationError,
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

const MAX_CHOICES: usize = 10;
const MAX_NOTES_LEN: usize = 1000;

fn choices(value: &Value) -> std::result::Result<Vec<String>, ValidationError> {
    validate_array(value, MAX_CHOICES)
}

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Volunteer>> {
    Json(state.store.list_volunteers().await)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Volunteer>)> {
    let client = state.client(&headers, peer.as_ref());
    state.enforce(Action::VolunteerRegistration, &client).await?;

    let body = json_object(body)?;
    let data = NewVolunteer {
        first_name: required(&body, "firstName", validate_name)?,
        last_name: required(&body, "lastName", validate_name)?,
        email: required(&body, "email", validate_email)?,
        phone: required(&body, "phone", validate_phone)?,
        availability: required(&body, "availability", choices)?,
        roles: required(&body, "roles", choices)?,
        experience: optional_text(&body, "experience", MAX_NOTES_LEN)?,
        emergency_contact: required(&body, "emergencyContact", validate_name)?,
        emergency_phone: required(&body, "emergencyPhone", validate_phone)?,
        additional_info: optional_text(&body, "additionalInfo", MAX_NOTES_LEN)?,
    };

    let volunteer = state.store.create_volunteer(data).await?;
    info!(id = %volunteer.id, client = %client, "Volunteer registered");
    Ok((StatusCode::CREATED, Json(volunteer)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Volunteer>> {
    let body = json_object(body)?;
    let id = body_id(&body)?;
    let update = VolunteerUpdate {
        first_name: if_present(&body, "firstName", validate_name)?,
        last_name: if_present(&body, "lastName", validate_name)?,
        email: if_present(&body, "email", validate_email)?,
        phone: if_present(&body, "phone", validate_phone)?,
        availability: if_present(&body, "availability", choices)?,
        roles: if_present(&body, "roles", choices)?,
        experience: nullable_text(&body, "experience", MAX_NOTES_LEN)?,
        emergency_contact: if_present(&body, "emergencyContact", validate_name)?,
        emergency_phone: if_present(&body, "emergencyPhone", validate_phone)?,
        additional_info: nullable_text(&body, "additionalInfo", MAX_NOTES_LEN)?,
    };

    let volunteer = state.store.update_volunteer(id, update).await?;
    info!(id = %volunteer.id, "Volunteer updated");
    Ok(Json(volunteer))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_id(query.id.as_deref())?;
    state.store.delete_volunteer(id).await?;
    info!(id = %id, "Volunteer deleted");
    Ok(SuccessResponse::ok())
}
