// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Records kept by the registration store.
//!
//! JSON field names are camelCase to match the public API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tournament skill level declared at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    FirstTime,
}

impl SkillLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            "first-time" => Some(Self::FirstTime),
            _ => None,
        }
    }
}

/// Sponsor tier. Ordered so that higher tiers compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorTier {
    Gold,
    Platinum,
}

impl SponsorTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }
}

/// How the body of a content block is meant to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Html,
    Markdown,
    Text,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "html" => Some(Self::Html),
            "markdown" => Some(Self::Markdown),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Tournament participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub skill_level: SkillLevel,
    pub dietary_restrictions: Option<String>,
    pub donation_completed: bool,
    pub registration_date: DateTime<Utc>,
}

/// Sanitized fields for a new participant.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub skill_level: SkillLevel,
    pub dietary_restrictions: Option<String>,
}

/// Sanitized partial update. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct ParticipantUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub dietary_restrictions: Option<Option<String>>,
    pub donation_completed: Option<bool>,
}

impl Participant {
    pub fn new(data: NewParticipant) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            skill_level: data.skill_level,
            dietary_restrictions: data.dietary_restrictions,
            donation_completed: false,
            registration_date: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: ParticipantUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.skill_level {
            self.skill_level = v;
        }
        if let Some(v) = update.dietary_restrictions {
            self.dietary_restrictions = v;
        }
        if let Some(v) = update.donation_completed {
            self.donation_completed = v;
        }
    }
}

/// Event-day volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub availability: Vec<String>,
    pub roles: Vec<String>,
    pub experience: Option<String>,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub additional_info: Option<String>,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVolunteer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub availability: Vec<String>,
    pub roles: Vec<String>,
    pub experience: Option<String>,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VolunteerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub availability: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub experience: Option<Option<String>>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub additional_info: Option<Option<String>>,
}

impl Volunteer {
    pub fn new(data: NewVolunteer) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            availability: data.availability,
            roles: data.roles,
            experience: data.experience,
            emergency_contact: data.emergency_contact,
            emergency_phone: data.emergency_phone,
            additional_info: data.additional_info,
            registration_date: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: VolunteerUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.availability {
            self.availability = v;
        }
        if let Some(v) = update.roles {
            self.roles = v;
        }
        if let Some(v) = update.experience {
            self.experience = v;
        }
        if let Some(v) = update.emergency_contact {
            self.emergency_contact = v;
        }
        if let Some(v) = update.emergency_phone {
            self.emergency_phone = v;
        }
        if let Some(v) = update.additional_info {
            self.additional_info = v;
        }
    }
}

/// Event sponsor. Deleting a sponsor only clears `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub tier: SponsorTier,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSponsor {
    pub name: String,
    pub website: Option<String>,
    pub tier: SponsorTier,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SponsorUpdate {
    pub name: Option<String>,
    pub website: Option<Option<String>>,
    pub tier: Option<SponsorTier>,
    pub logo_url: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl Sponsor {
    pub fn new(data: NewSponsor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            website: data.website,
            tier: data.tier,
            logo_url: data.logo_url,
            description: data.description,
            sort_order: data.sort_order,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: SponsorUpdate) {
        if let Some(v) = update.name {
            self.name = v;
        }
        if let Some(v) = update.website {
            self.website = v;
        }
        if let Some(v) = update.tier {
            self.tier = v;
        }
        if let Some(v) = update.logo_url {
            self.logo_url = v;
        }
        if let Some(v) = update.description {
            self.description = v;
        }
        if let Some(v) = update.sort_order {
            self.sort_order = v;
        }
        if let Some(v) = update.is_active {
            self.is_active = v;
        }
    }
}

/// Editable block of page content, addressed by a unique key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: Uuid,
    pub key: String,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContentBlock {
    pub key: String,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ContentBlockUpdate {
    pub key: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<ContentType>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl ContentBlock {
    pub fn new(data: NewContentBlock) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            key: data.key,
            title: data.title,
            content: data.content,
            content_type: data.content_type,
            sort_order: data.sort_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ContentBlockUpdate) {
        if let Some(v) = update.key {
            self.key = v;
        }
        if let Some(v) = update.title {
            self.title = v;
        }
        if let Some(v) = update.content {
            self.content = v;
        }
        if let Some(v) = update.content_type {
            self.content_type = v;
        }
        if let Some(v) = update.sort_order {
            self.sort_order = v;
        }
        if let Some(v) = update.is_active {
            self.is_active = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Event-wide settings. Only one record exists at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettings {
    pub id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub venue: String,
    pub acs_link: String,
    pub venmo_handle: String,
    pub max_participants: i64,
    pub registration_open: bool,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized replacement values for [`EventSettings`].
#[derive(Debug, Clone)]
pub struct SettingsInput {
    pub event_date: NaiveDate,
    pub event_time: String,
    pub venue: String,
    pub acs_link: String,
    pub venmo_handle: String,
    pub max_participants: i64,
    pub registration_open: bool,
}

impl EventSettings {
    pub fn new(input: SettingsInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_date: input.event_date,
            event_time: input.event_time,
            venue: input.venue,
            acs_link: input.acs_link,
            venmo_handle: input.venmo_handle,
            max_participants: input.max_participants,
            registration_open: input.registration_open,
            updated_at: Utc::now(),
        }
    }

    /// Replace every field, keeping the record id.
    pub fn replace(&mut self, input: SettingsInput) {
        let id = self.id;
        *self = Self::new(input);
        self.id = id;
    }
}

impl Default for SettingsInput {
    fn default() -> Self {
        Self {
            event_date: NaiveDate::from_ymd_opt(2024, 9, 27).unwrap_or_default(),
            event_time: "5:00 PM - 10:00 PM".to_string(),
            venue: "Pickleball HQ, New Jersey".to_string(),
            acs_link: "https://www.cancer.org/involved/donate.html".to_string(),
            venmo_handle: "@EventOrganizer".to_string(),
            max_participants: 64,
            registration_open: true,
        }
    }
}
