// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request field validator.
//!
//! Every mutating endpoint runs each incoming field through one of these
//! rules before the value reaches the store:
//! - String sanitization (script blocks and angle brackets stripped, length capped)
//! - Email, phone and name shape checks
//! - Enumerated values (skill level, sponsor tier, content type)
//! - URL, calendar date, boolean and numeric range parsing
//!
//! Rules are pure functions over untyped JSON values.

use crate::models::{ContentType, SkillLevel, SponsorTier};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script pattern is valid"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s()+-]+$").expect("phone pattern is valid"));

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid"));

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

/// Maximum stored length of an email address.
pub const MAX_EMAIL_LEN: usize = 100;
/// Maximum stored length of a phone number.
pub const MAX_PHONE_LEN: usize = 20;
/// Maximum stored length of a person's name.
pub const MAX_NAME_LEN: usize = 50;
/// Maximum stored length of each element of a list field.
pub const MAX_ITEM_LEN: usize = 100;
/// Maximum length considered when matching an enumerated value.
const MAX_ENUM_LEN: usize = 20;
/// Minimum number of characters in a phone number.
const MIN_PHONE_LEN: usize = 10;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("Value cannot be empty")]
    Empty,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone format")]
    InvalidPhone,

    #[error("Invalid name format")]
    InvalidName,

    #[error("Input must be an array")]
    NotAnArray,

    #[error("Array cannot exceed {max_items} items")]
    TooManyItems { max_items: usize },

    #[error("Invalid skill level")]
    InvalidSkillLevel,

    #[error("Invalid sponsor tier")]
    InvalidSponsorTier,

    #[error("Invalid content type")]
    InvalidContentType,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("URL must use http or https")]
    InvalidUrlScheme,

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("Invalid date")]
    InvalidDate,

    #[error("Invalid boolean value")]
    InvalidBoolean,

    #[error("Invalid number")]
    InvalidNumber,

    #[error("Number must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("Number must be a whole number")]
    NotAnInteger,
}

/// Sanitize raw text: drop script blocks and angle brackets, cap the length
/// at `max_length` characters, then trim.
pub fn sanitize_str(input: &str, max_length: usize) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_brackets = without_scripts.replace(|c: char| c == '<' || c == '>', "");
    let truncated: String = without_brackets.chars().take(max_length).collect();
    truncated.trim().to_string()
}

/// Sanitize an untyped value that must be a string.
pub fn sanitize_string(value: &Value, max_length: usize) -> Result<String, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("Input"))?;
    Ok(sanitize_str(input, max_length))
}

/// Sanitize a string that must still contain something afterwards.
pub fn validate_required_text(value: &Value, max_length: usize) -> Result<String, ValidationError> {
    let sanitized = sanitize_string(value, max_length)?;
    if sanitized.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(sanitized)
}

/// Validate an email address, returning it lower-cased.
pub fn validate_email(value: &Value) -> Result<String, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("Email"))?;
    let sanitized = sanitize_str(input, MAX_EMAIL_LEN).to_lowercase();

    if !EMAIL.is_match(&sanitized) {
        debug!(email = %sanitized, "Email rejected");
        return Err(ValidationError::InvalidEmail);
    }
    Ok(sanitized)
}

/// Validate a phone number. The accepted text is returned as-is.
pub fn validate_phone(value: &Value) -> Result<String, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("Phone"))?;
    let sanitized = sanitize_str(input, MAX_PHONE_LEN);

    if !PHONE.is_match(&sanitized) || sanitized.chars().count() < MIN_PHONE_LEN {
        debug!(phone = %sanitized, "Phone rejected");
        return Err(ValidationError::InvalidPhone);
    }
    Ok(sanitized)
}

/// Validate a person's name: letters, spaces, hyphens and apostrophes.
pub fn validate_name(value: &Value) -> Result<String, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("Name"))?;
    let sanitized = sanitize_str(input, MAX_NAME_LEN);

    // The pattern requires at least one character, so empty input fails here too.
    if !NAME.is_match(&sanitized) {
        debug!(name = %sanitized, "Name rejected");
        return Err(ValidationError::InvalidName);
    }
    Ok(sanitized)
}

/// Validate a list of at most `max_items` strings, sanitizing each element.
pub fn validate_array(value: &Value, max_items: usize) -> Result<Vec<String>, ValidationError> {
    let items = value.as_array().ok_or(ValidationError::NotAnArray)?;

    if items.len() > max_items {
        return Err(ValidationError::TooManyItems { max_items });
    }

    items
        .iter()
        .map(|item| sanitize_string(item, MAX_ITEM_LEN))
        .collect()
}

pub fn validate_skill_level(value: &Value) -> Result<SkillLevel, ValidationError> {
    let sanitized = sanitize_string(value, MAX_ENUM_LEN)?.to_lowercase();
    SkillLevel::parse(&sanitized).ok_or(ValidationError::InvalidSkillLevel)
}

pub fn validate_sponsor_tier(value: &Value) -> Result<SponsorTier, ValidationError> {
    let sanitized = sanitize_string(value, MAX_ENUM_LEN)?.to_lowercase();
    SponsorTier::parse(&sanitized).ok_or(ValidationError::InvalidSponsorTier)
}

pub fn validate_content_type(value: &Value) -> Result<ContentType, ValidationError> {
    let sanitized = sanitize_string(value, MAX_ENUM_LEN)?.to_lowercase();
    ContentType::parse(&sanitized).ok_or(ValidationError::InvalidContentType)
}

/// Validate an absolute http(s) URL and return its canonical form.
pub fn validate_url(value: &Value) -> Result<String, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("URL"))?;

    let parsed = Url::parse(input).map_err(|_| {
        debug!(url = %input, "Unparseable URL");
        ValidationError::InvalidUrl
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        debug!(url = %input, scheme = parsed.scheme(), "URL scheme rejected");
        return Err(ValidationError::InvalidUrlScheme);
    }

    Ok(parsed.to_string())
}

/// Validate a `YYYY-MM-DD` calendar date.
pub fn validate_date(value: &Value) -> Result<NaiveDate, ValidationError> {
    let input = value.as_str().ok_or(ValidationError::NotAString("Date"))?;

    if !DATE.is_match(input) {
        return Err(ValidationError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// Accept a JSON boolean or the strings `"true"` / `"false"` in any case.
pub fn validate_boolean(value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(ValidationError::InvalidBoolean),
    }
}

/// Accept a number or numeric string within `[min, max]`.
pub fn validate_number(value: &Value, min: f64, max: f64) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let number = parsed
        .filter(|n| n.is_finite())
        .ok_or(ValidationError::InvalidNumber)?;

    if number < min || number > max {
        return Err(ValidationError::OutOfRange { min, max });
    }
    Ok(number)
}

/// Like [`validate_number`], but the value must also be whole.
pub fn validate_integer(value: &Value, min: i64, max: i64) -> Result<i64, ValidationError> {
    let number = validate_number(value, min as f64, max as f64)?;
    if number.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger);
    }
    Ok(number as i64)
}
