// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end tests for the registration API, driven through the router.

mod harness;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use event_registration::config::{Config, RateLimitPolicy};
use harness::{payloads, TestApp};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    for path in ["/health", "/healthz"] {
        let res = app.get(path).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["status"], "healthy");
        assert_eq!(res.body["service"], "event-registration");
    }
}

#[tokio::test]
async fn test_participant_lifecycle() {
    let app = TestApp::new();

    let res = app
        .post("/api/participants", "203.0.113.7", payloads::participant(1))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["email"], "player1@example.com");
    assert_eq!(res.body["lastName"], "O'Brien");
    assert_eq!(res.body["skillLevel"], "intermediate");
    assert_eq!(res.body["donationCompleted"], false);
    let id = res.body["id"].as_str().unwrap().to_string();

    let res = app.get("/api/participants").await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    let res = app
        .put(
            "/api/participants",
            "203.0.113.7",
            json!({ "id": id, "donationCompleted": "true", "dietaryRestrictions": null }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["donationCompleted"], true);
    assert!(res.body["dietaryRestrictions"].is_null());
    assert_eq!(res.body["firstName"], "Jamie");

    let res = app.delete(&format!("/api/participants?id={id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "success": true }));

    let res = app.get("/api/participants").await;
    assert!(res.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_participant_validation_errors() {
    let app = TestApp::new();

    let mut body = payloads::participant(1);
    body["email"] = json!("not-an-email");
    let res = app.post("/api/participants", "203.0.113.7", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "email: Invalid email format");

    let mut body = payloads::participant(2);
    body["skillLevel"] = json!("pro");
    let res = app.post("/api/participants", "203.0.113.7", body).await;
    assert_eq!(res.error(), "skillLevel: Invalid skill level");

    let mut body = payloads::participant(3);
    body.as_object_mut().unwrap().remove("phone");
    let res = app.post("/api/participants", "203.0.113.7", body).await;
    assert_eq!(res.error(), "phone: Phone must be a string");

    let mut body = payloads::participant(4);
    body["firstName"] = json!("R2D2");
    let res = app.post("/api/participants", "203.0.113.7", body).await;
    assert_eq!(res.error(), "firstName: Invalid name format");

    // Nothing invalid reaches the store.
    assert!(app.state.store.list_participants().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = TestApp::new();

    let res = app
        .post("/api/participants", "203.0.113.7", payloads::participant(1))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);

    // Same address with different casing.
    let mut body = payloads::participant(2);
    body["email"] = json!("PLAYER1@example.COM");
    let res = app.post("/api/participants", "203.0.113.8", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Email already registered");
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = TestApp::new();

    let mut request = Request::builder()
        .method(Method::POST)
        .uri("/api/participants")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))
        .unwrap();
    request.extensions_mut().insert(harness::peer("203.0.113.7"));
    let res = app.send_request(request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid JSON body");

    let res = app
        .post("/api/volunteers", "203.0.113.7", json!(["not", "an", "object"]))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid JSON body");
}

#[tokio::test]
async fn test_registration_rate_limit() {
    let app = TestApp::new();

    for n in 0..3 {
        let res = app
            .post("/api/volunteers", "198.51.100.20", payloads::volunteer(n))
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "volunteer {n}");
    }

    let res = app
        .post("/api/volunteers", "198.51.100.20", payloads::volunteer(3))
        .await;
    assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        res.error(),
        "Too many volunteer registration attempts. Please try again later."
    );
    let retry_after: u64 = res.headers[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 3600);

    // Other clients and other actions keep their own budget.
    let res = app
        .post("/api/volunteers", "198.51.100.21", payloads::volunteer(4))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app
        .post("/api/participants", "198.51.100.20", payloads::participant(1))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);

    assert_eq!(app.state.store.list_volunteers().await.len(), 4);
}

#[tokio::test]
async fn test_rate_limit_counts_rejected_requests() {
    let app = TestApp::new();

    // The gate runs before validation, so invalid attempts use up the budget too.
    for _ in 0..5 {
        let res = app
            .post("/api/participants", "192.0.2.50", json!({ "email": "x" }))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    let res = app
        .post("/api/participants", "192.0.2.50", payloads::participant(1))
        .await;
    assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        res.error(),
        "Too many registration attempts. Please try again later."
    );
}

#[tokio::test]
async fn test_volunteer_choices_limit() {
    let app = TestApp::new();

    let mut body = payloads::volunteer(1);
    body["roles"] = json!((0..11).map(|i| format!("Role {i}")).collect::<Vec<_>>());
    let res = app.post("/api/volunteers", "203.0.113.7", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "roles: Array cannot exceed 10 items");

    let mut body = payloads::volunteer(2);
    body["availability"] = json!("all day");
    let res = app.post("/api/volunteers", "203.0.113.7", body).await;
    assert_eq!(res.error(), "availability: Input must be an array");
}

#[tokio::test]
async fn test_sponsor_ordering_and_soft_delete() {
    let app = TestApp::new();

    let gold = app
        .post(
            "/api/sponsors",
            "203.0.113.7",
            payloads::sponsor("Local Bakery", "gold", 0),
        )
        .await;
    assert_eq!(gold.status, StatusCode::CREATED);
    assert_eq!(gold.body["website"], "https://sponsor.example.com/");
    assert_eq!(gold.body["isActive"], true);

    let platinum = app
        .post(
            "/api/sponsors",
            "203.0.113.7",
            payloads::sponsor("Big Bank", "Platinum", 5),
        )
        .await;
    assert_eq!(platinum.body["tier"], "platinum");

    let res = app.get("/api/sponsors").await;
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Big Bank", "Local Bakery"]);

    let id = platinum.body["id"].as_str().unwrap();
    let res = app.delete(&format!("/api/sponsors?id={id}")).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/api/sponsors").await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    // Still stored, so it can be reactivated.
    let res = app
        .put(
            "/api/sponsors",
            "203.0.113.7",
            json!({ "id": id, "isActive": true, "website": "" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["website"].is_null());
    assert_eq!(app.get("/api/sponsors").await.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sponsor_validation() {
    let app = TestApp::new();

    let mut body = payloads::sponsor("Shady Corp", "gold", 0);
    body["website"] = json!("javascript:alert(1)");
    let res = app.post("/api/sponsors", "203.0.113.7", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "website: URL must use http or https");

    let res = app
        .post(
            "/api/sponsors",
            "203.0.113.7",
            payloads::sponsor("Diamond Inc", "diamond", 0),
        )
        .await;
    assert_eq!(res.error(), "tier: Invalid sponsor tier");

    let res = app
        .post(
            "/api/sponsors",
            "203.0.113.7",
            payloads::sponsor("Overflow", "gold", 5000),
        )
        .await;
    assert_eq!(res.error(), "sortOrder: Number must be between 0 and 1000");
}

#[tokio::test]
async fn test_content_blocks() {
    let app = TestApp::new();

    let res = app
        .post(
            "/api/content",
            "203.0.113.7",
            json!({
                "key": "hero",
                "title": "Welcome <script>alert(1)</script>",
                "content": "<p>Join us on the courts</p>",
                "contentType": "HTML"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["title"], "Welcome");
    assert_eq!(res.body["content"], "pJoin us on the courts/p");
    assert_eq!(res.body["contentType"], "html");
    let id = res.body["id"].as_str().unwrap().to_string();

    let res = app
        .post(
            "/api/content",
            "203.0.113.7",
            json!({ "key": "hero", "title": "Again", "content": "dup" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Content key already exists");

    let res = app.get("/api/content?key=hero").await;
    assert_eq!(res.body["id"], id.as_str());

    let res = app.get("/api/content?key=missing").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_null());

    let res = app
        .put(
            "/api/content",
            "203.0.113.7",
            json!({ "id": id, "isActive": false }),
        )
        .await;
    assert_eq!(res.body["isActive"], false);
    assert!(app.get("/api/content").await.body.as_array().unwrap().is_empty());

    let res = app.delete(&format!("/api/content?id={id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.delete(&format!("/api/content?id={id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Content not found");
}

#[tokio::test]
async fn test_settings_defaults_and_update() {
    let app = TestApp::new();

    let res = app.get("/api/settings").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["eventDate"], "2024-09-27");
    assert_eq!(res.body["maxParticipants"], 64);
    assert_eq!(res.body["registrationOpen"], true);
    let id = res.body["id"].clone();

    let res = app
        .put("/api/settings", "203.0.113.7", payloads::settings())
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["eventDate"], "2025-09-26");
    assert_eq!(res.body["maxParticipants"], 48);
    assert_eq!(res.body["registrationOpen"], false);

    let res = app.get("/api/settings").await;
    assert_eq!(res.body["venue"], "Riverside Courts");
}

#[tokio::test]
async fn test_settings_validation() {
    let app = TestApp::new();

    let mut body = payloads::settings();
    body["eventDate"] = json!("09/26/2025");
    let res = app.put("/api/settings", "203.0.113.7", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "eventDate: Invalid date format. Use YYYY-MM-DD");

    let mut body = payloads::settings();
    body["eventDate"] = json!("2025-02-30");
    let res = app.put("/api/settings", "203.0.113.7", body).await;
    assert_eq!(res.error(), "eventDate: Invalid date");

    let mut body = payloads::settings();
    body["maxParticipants"] = json!(0);
    let res = app.put("/api/settings", "203.0.113.7", body).await;
    assert_eq!(res.error(), "maxParticipants: Number must be between 1 and 10000");

    let mut body = payloads::settings();
    body["registrationOpen"] = json!("yes");
    let res = app.put("/api/settings", "203.0.113.7", body).await;
    assert_eq!(res.error(), "registrationOpen: Invalid boolean value");

    // Failed updates leave the defaults in place.
    assert_eq!(app.get("/api/settings").await.body["maxParticipants"], 64);
}

#[tokio::test]
async fn test_admin_login() {
    let app = TestApp::new();

    let res = app
        .post(
            "/api/admin/auth",
            "203.0.113.7",
            json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Invalid credentials");

    let res = app
        .post(
            "/api/admin/auth",
            "203.0.113.7",
            json!({ "username": "admin", "password": "pickleballadmin2024" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "success": true }));
}

#[tokio::test(start_paused = true)]
async fn test_admin_lockout_expires() {
    let mut config = Config::default();
    config.rate_limit.admin_login = RateLimitPolicy::new(2, 60);
    let app = TestApp::with_config(config);
    let good = json!({ "username": "admin", "password": "pickleballadmin2024" });

    for _ in 0..2 {
        let res = app
            .post("/api/admin/auth", "192.0.2.9", json!({ "username": "admin" }))
            .await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }

    // Locked out even with the right password.
    let res = app.post("/api/admin/auth", "192.0.2.9", good.clone()).await;
    assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(res.error(), "Too many login attempts. Please try again later.");

    tokio::time::advance(Duration::from_secs(61)).await;

    let res = app.post("/api/admin/auth", "192.0.2.9", good).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_requires_valid_id() {
    let app = TestApp::new();

    for path in [
        "/api/participants",
        "/api/volunteers",
        "/api/sponsors",
        "/api/content",
    ] {
        let res = app.delete(path).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(res.error(), "ID required");
    }

    let res = app.delete("/api/volunteers?id=42").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid ID");

    let res = app
        .delete("/api/volunteers?id=00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Volunteer not found");
}

#[tokio::test]
async fn test_update_requires_id() {
    let app = TestApp::new();

    let res = app
        .put("/api/participants", "203.0.113.7", json!({ "firstName": "Jo" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "ID required");

    let res = app
        .put(
            "/api/sponsors",
            "203.0.113.7",
            json!({ "id": "7b0c5e3e-0f7a-4e55-9a3b-1f0b6f3f2a10", "name": "Ghost" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Sponsor not found");
}
