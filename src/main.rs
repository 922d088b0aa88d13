// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event Registration Service
//!
//! Serves the registration API for the tournament site.
//!
//! ## Configuration
//!
//! Read from `event-registration.toml` (optional) and the environment:
//!
//! - `EVENTREG_BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `EVENTREG_ALLOWED_ORIGINS`: Comma-separated CORS origins
//! - `EVENTREG_TRUSTED_PROXIES`: Comma-separated proxy IPs whose forwarding headers are honoured
//! - `EVENTREG_RATE_LIMIT__<ACTION>__MAX_REQUESTS` / `__WINDOW_SECS`: Per-action limits
//! - `EVENTREG_RATE_LIMIT__SWEEP_INTERVAL_SECS`: Limiter cleanup interval, 0 disables (default: 300)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: Admin credentials
//!
//! A `.env` file in the working directory is loaded first.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use event_registration::{
    config::Config,
    handlers::{router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::load()?;
    let rate_limit = &config.rate_limit;
    info!(
        bind_addr = %config.bind_addr,
        trusted_proxies = config.trusted_proxies.len(),
        participant_max = rate_limit.participant.max_requests,
        volunteer_max = rate_limit.volunteer.max_requests,
        admin_login_max = rate_limit.admin_login.max_requests,
        sweep_interval_secs = rate_limit.sweep_interval_secs,
        "Starting event registration service"
    );

    let state = Arc::new(AppState::new(config.clone()));

    // Expired limiter records are dropped in the background. Zero disables the sweep.
    let sweep_interval = config.rate_limit.sweep_interval();
    let _sweeper = (!sweep_interval.is_zero()).then(|| state.limiter.spawn_sweeper(sweep_interval));

    let app = router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
