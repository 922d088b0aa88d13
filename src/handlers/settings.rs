// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event settings endpoints.

use super::{json_object, required, AppState};
use crate::config::Action;
use crate::error::Result;
use crate::models::{EventSettings, SettingsInput};
use crate::validator::{
    validate_boolean, validate_date, validate_integer, validate_required_text, validate_url,
    ValidationError,
};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const MAX_SHORT_TEXT_LEN: usize = 50;
const MAX_VENUE_LEN: usize = 200;
const MAX_PARTICIPANTS: i64 = 10_000;

fn short_text(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_SHORT_TEXT_LEN)
}

fn venue(value: &Value) -> std::result::Result<String, ValidationError> {
    validate_required_text(value, MAX_VENUE_LEN)
}

fn participant_cap(value: &Value) -> std::result::Result<i64, ValidationError> {
    validate_integer(value, 1, MAX_PARTICIPANTS)
}

/// Current settings; defaults are stored on first read.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<EventSettings> {
    Json(state.store.settings().await)
}

/// Replace all settings.
pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<EventSettings>> {
    let client = state.client(&headers, peer.as_ref());
    state.enforce(Action::SettingsUpdate, &client).await?;

    let body = json_object(body)?;
    let input = SettingsInput {
        event_date: required(&body, "eventDate", validate_date)?,
        event_time: required(&body, "eventTime", short_text)?,
        venue: required(&body, "venue", venue)?,
        acs_link: required(&body, "acsLink", validate_url)?,
        venmo_handle: required(&body, "venmoHandle", short_text)?,
        max_participants: required(&body, "maxParticipants", participant_cap)?,
        registration_open: required(&body, "registrationOpen", validate_boolean)?,
    };

    let settings = state.store.put_settings(input).await;
    info!(
        event_date = %settings.event_date,
        registration_open = settings.registration_open,
        "Event settings updated"
    );
    Ok(Json(settings))
}
