// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-memory record store.
//!
//! Holds participants, volunteers, sponsors, content blocks and the event
//! settings for the lifetime of the process. Email addresses (per table)
//! and content keys are unique.

use crate::models::{
    ContentBlock, ContentBlockUpdate, EventSettings, NewContentBlock, NewParticipant, NewSponsor,
    NewVolunteer, Participant, ParticipantUpdate, SettingsInput, Sponsor, SponsorUpdate,
    Volunteer, VolunteerUpdate,
};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Store error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Duplicate {entity} {field}")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Default)]
struct Tables {
    participants: HashMap<Uuid, Participant>,
    volunteers: HashMap<Uuid, Volunteer>,
    sponsors: HashMap<Uuid, Sponsor>,
    content: HashMap<Uuid, ContentBlock>,
    settings: Option<EventSettings>,
}

/// Shared handle to the record tables.
#[derive(Clone, Default)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Participants

    /// All participants, most recent registration first.
    pub async fn list_participants(&self) -> Vec<Participant> {
        let tables = self.tables.read().await;
        let mut participants: Vec<Participant> = tables.participants.values().cloned().collect();
        participants.sort_by_key(|p| Reverse(p.registration_date));
        participants
    }

    pub async fn create_participant(&self, data: NewParticipant) -> Result<Participant> {
        let mut tables = self.tables.write().await;
        if tables.participants.values().any(|p| p.email == data.email) {
            return Err(StoreError::Duplicate {
                entity: "participant",
                field: "email",
            });
        }

        let participant = Participant::new(data);
        tables.participants.insert(participant.id, participant.clone());
        debug!(id = %participant.id, "Participant created");
        Ok(participant)
    }

    pub async fn update_participant(&self, id: Uuid, update: ParticipantUpdate) -> Result<Participant> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &update.email {
            if tables.participants.values().any(|p| p.id != id && &p.email == email) {
                return Err(StoreError::Duplicate {
                    entity: "participant",
                    field: "email",
                });
            }
        }

        let participant = tables
            .participants
            .get_mut(&id)
            .ok_or(StoreError::NotFound {
                entity: "participant",
                id,
            })?;
        participant.apply(update);
        Ok(participant.clone())
    }

    pub async fn delete_participant(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .participants
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: "participant",
                id,
            })
    }

    // Volunteers

    /// All volunteers, most recent registration first.
    pub async fn list_volunteers(&self) -> Vec<Volunteer> {
        let tables = self.tables.read().await;
        let mut volunteers: Vec<Volunteer> = tables.volunteers.values().cloned().collect();
        volunteers.sort_by_key(|v| Reverse(v.registration_date));
        volunteers
    }

    pub async fn create_volunteer(&self, data: NewVolunteer) -> Result<Volunteer> {
        let mut tables = self.tables.write().await;
        if tables.volunteers.values().any(|v| v.email == data.email) {
            return Err(StoreError::Duplicate {
                entity: "volunteer",
                field: "email",
            });
        }

        let volunteer = Volunteer::new(data);
        tables.volunteers.insert(volunteer.id, volunteer.clone());
        debug!(id = %volunteer.id, "Volunteer created");
        Ok(volunteer)
    }

    pub async fn update_volunteer(&self, id: Uuid, update: VolunteerUpdate) -> Result<Volunteer> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &update.email {
            if tables.volunteers.values().any(|v| v.id != id && &v.email == email) {
                return Err(StoreError::Duplicate {
                    entity: "volunteer",
                    field: "email",
                });
            }
        }

        let volunteer = tables
            .volunteers
            .get_mut(&id)
            .ok_or(StoreError::NotFound {
                entity: "volunteer",
                id,
            })?;
        volunteer.apply(update);
        Ok(volunteer.clone())
    }

    pub async fn delete_volunteer(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .volunteers
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: "volunteer",
                id,
            })
    }

    // Sponsors

    /// Active sponsors: platinum before gold, then by sort order, then oldest first.
    pub async fn list_active_sponsors(&self) -> Vec<Sponsor> {
        let tables = self.tables.read().await;
        let mut sponsors: Vec<Sponsor> = tables
            .sponsors
            .values()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        sponsors.sort_by_key(|s| (Reverse(s.tier), s.sort_order, s.created_at));
        sponsors
    }

    pub async fn create_sponsor(&self, data: NewSponsor) -> Sponsor {
        let sponsor = Sponsor::new(data);
        self.tables
            .write()
            .await
            .sponsors
            .insert(sponsor.id, sponsor.clone());
        debug!(id = %sponsor.id, tier = ?sponsor.tier, "Sponsor created");
        sponsor
    }

    pub async fn update_sponsor(&self, id: Uuid, update: SponsorUpdate) -> Result<Sponsor> {
        let mut tables = self.tables.write().await;
        let sponsor = tables.sponsors.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "sponsor",
            id,
        })?;
        sponsor.apply(update);
        Ok(sponsor.clone())
    }

    /// Soft delete: the sponsor stays stored but is no longer listed.
    pub async fn deactivate_sponsor(&self, id: Uuid) -> Result<()> {
        self.update_sponsor(
            id,
            SponsorUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .map(|_| ())
    }

    // Content blocks

    /// Active content blocks by sort order, then oldest first.
    pub async fn list_active_content(&self) -> Vec<ContentBlock> {
        let tables = self.tables.read().await;
        let mut blocks: Vec<ContentBlock> = tables
            .content
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        blocks.sort_by_key(|c| (c.sort_order, c.created_at));
        blocks
    }

    /// Look a block up by key, active or not.
    pub async fn content_by_key(&self, key: &str) -> Option<ContentBlock> {
        let tables = self.tables.read().await;
        tables.content.values().find(|c| c.key == key).cloned()
    }

    pub async fn create_content(&self, data: NewContentBlock) -> Result<ContentBlock> {
        let mut tables = self.tables.write().await;
        if tables.content.values().any(|c| c.key == data.key) {
            return Err(StoreError::Duplicate {
                entity: "content",
                field: "key",
            });
        }

        let block = ContentBlock::new(data);
        tables.content.insert(block.id, block.clone());
        debug!(id = %block.id, key = %block.key, "Content block created");
        Ok(block)
    }

    pub async fn update_content(&self, id: Uuid, update: ContentBlockUpdate) -> Result<ContentBlock> {
        let mut tables = self.tables.write().await;
        if let Some(key) = &update.key {
            if tables.content.values().any(|c| c.id != id && &c.key == key) {
                return Err(StoreError::Duplicate {
                    entity: "content",
                    field: "key",
                });
            }
        }

        let block = tables.content.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "content",
            id,
        })?;
        block.apply(update);
        Ok(block.clone())
    }

    pub async fn delete_content(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .content
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: "content",
                id,
            })
    }

    // Settings

    /// Current settings, created with defaults on first access.
    pub async fn settings(&self) -> EventSettings {
        let mut tables = self.tables.write().await;
        tables
            .settings
            .get_or_insert_with(|| {
                debug!("Initialising default event settings");
                EventSettings::new(SettingsInput::default())
            })
            .clone()
    }

    /// Replace the settings, creating the record if none exists.
    pub async fn put_settings(&self, input: SettingsInput) -> EventSettings {
        let mut tables = self.tables.write().await;
        let settings = match tables.settings.take() {
            Some(mut existing) => {
                existing.replace(input);
                existing
            }
            None => EventSettings::new(input),
        };
        tables.settings = Some(settings.clone());
        settings
    }
}
