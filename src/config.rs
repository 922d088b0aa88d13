// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the registration service.
//!
//! Values come from an optional `event-registration.toml` next to the
//! binary, overridden by `EVENTREG_`-prefixed environment variables
//! (nested keys joined with `__`, e.g. `EVENTREG_RATE_LIMIT__VOLUNTEER__MAX_REQUESTS`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Configuration for the registration service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Origins allowed by CORS. Empty means same-origin only.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Reverse proxies whose `X-Forwarded-For` / `X-Real-IP` headers are
    /// believed. Empty means clients are keyed by socket address alone.
    #[serde(default)]
    pub trusted_proxies: Vec<IpAddr>,

    /// Per-action rate limits
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Static admin credentials
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Limit applied to one action: at most `max_requests` per fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitPolicy {
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Rate limiting configuration, one policy per guarded action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Tournament registration (default: 5 per hour)
    #[serde(default = "default_participant_policy")]
    pub participant: RateLimitPolicy,

    /// Volunteer registration (default: 3 per hour)
    #[serde(default = "default_volunteer_policy")]
    pub volunteer: RateLimitPolicy,

    /// Sponsor creation (default: 5 per hour)
    #[serde(default = "default_sponsor_policy")]
    pub sponsor: RateLimitPolicy,

    /// Content block creation (default: 5 per hour)
    #[serde(default = "default_content_policy")]
    pub content: RateLimitPolicy,

    /// Settings update (default: 10 per hour)
    #[serde(default = "default_settings_policy")]
    pub settings: RateLimitPolicy,

    /// Admin login attempts (default: 5 per 15 minutes)
    #[serde(default = "default_admin_login_policy")]
    pub admin_login: RateLimitPolicy,

    /// Interval between sweeps of expired limiter records in seconds (default: 300)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Admin credentials checked by the login endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A rate-limited action. The action name prefixes the limiter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ParticipantRegistration,
    VolunteerRegistration,
    SponsorCreation,
    ContentCreation,
    SettingsUpdate,
    AdminLogin,
}

impl Action {
    /// Key prefix used in the limiter map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParticipantRegistration => "participant",
            Self::VolunteerRegistration => "volunteer",
            Self::SponsorCreation => "sponsor",
            Self::ContentCreation => "content",
            Self::SettingsUpdate => "settings",
            Self::AdminLogin => "admin_login",
        }
    }

    /// Wording used in the "Too many ... attempts" message.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ParticipantRegistration => "registration",
            Self::VolunteerRegistration => "volunteer registration",
            Self::SponsorCreation => "sponsor creation",
            Self::ContentCreation => "content creation",
            Self::SettingsUpdate => "settings update",
            Self::AdminLogin => "login",
        }
    }

    /// Limiter key for a client, e.g. `participant_203.0.113.7`.
    pub fn key(&self, client: &str) -> String {
        format!("{}_{}", self.as_str(), client)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const HOUR_SECS: u64 = 60 * 60;

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_participant_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(5, HOUR_SECS)
}

fn default_volunteer_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(3, HOUR_SECS)
}

fn default_sponsor_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(5, HOUR_SECS)
}

fn default_content_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(5, HOUR_SECS)
}

fn default_settings_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(10, HOUR_SECS)
}

fn default_admin_login_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(5, 15 * 60) // lockout after 5 failures
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "pickleballadmin2024".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_origins: Vec::new(),
            trusted_proxies: Vec::new(),
            rate_limit: RateLimitConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            participant: default_participant_policy(),
            volunteer: default_volunteer_policy(),
            sponsor: default_sponsor_policy(),
            content: default_content_policy(),
            settings: default_settings_policy(),
            admin_login: default_admin_login_policy(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl RateLimitConfig {
    /// Policy governing an action.
    pub fn policy(&self, action: Action) -> RateLimitPolicy {
        match action {
            Action::ParticipantRegistration => self.participant,
            Action::VolunteerRegistration => self.volunteer,
            Action::SponsorCreation => self.sponsor,
            Action::ContentCreation => self.content,
            Action::SettingsUpdate => self.settings,
            Action::AdminLogin => self.admin_login,
        }
    }

    /// Get the sweep interval duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Config {
    /// Load configuration from the optional config file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config: Config = config::Config::builder()
            .add_source(config::File::with_name("event-registration").required(false))
            .add_source(
                config::Environment::with_prefix("EVENTREG")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .with_list_parse_key("trusted_proxies")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        // Credential variables from earlier deployments still apply.
        if let Ok(username) = std::env::var("ADMIN_USERNAME") {
            config.admin.username = username;
        }
        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            config.admin.password = password;
        }

        Ok(config)
    }
}
