// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event Registration
//!
//! Backend for a charity tournament site: participant and volunteer sign-up,
//! sponsors, editable content blocks, event settings and an admin login.
//!
//! Every mutating endpoint is guarded by:
//!
//! - A per-client fixed-window rate limit (e.g. 5 registrations per hour)
//! - Field validation and sanitization before anything is stored

pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod models;
pub mod store;
pub mod validator;

pub use config::Config;
pub use error::AppError;
pub use limiter::{RateLimitResult, RateLimiter};
pub use store::Store;
pub use validator::ValidationError;
