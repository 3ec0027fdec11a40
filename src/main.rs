// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission Rate Limiter Service
//!
//! An ingress-level admission gate for the portfolio's public mutation
//! endpoints:
//!
//! - 2 contact-form submissions per hour per client (default)
//! - 3 testimonial submissions per hour per client (default)
//! - Fixed windows; quota resets at first-attempt-time + window
//! - Identity from forwarded headers, shared `"unknown"` fallback bucket
//! - Payload validation before anything reaches the backend
//!
//! ## Usage
//!
//! The service provides two modes of operation:
//!
//! 1. **Direct gate**: the frontend posts submissions to `/contact` and
//!    `/testimonial`; admitted, valid requests are handed upstream.
//!
//! 2. **External auth service**: the backend calls `/check` with an already
//!    resolved identity and applies the decision itself.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `CONTACT_LIMIT`: Contact submissions per window (default: 2)
//! - `CONTACT_WINDOW_MS`: Contact window in milliseconds (default: 3600000)
//! - `TESTIMONIAL_LIMIT`: Testimonial submissions per window (default: 3)
//! - `TESTIMONIAL_WINDOW_MS`: Testimonial window in milliseconds (default: 3600000)
//! - `SWEEP_THRESHOLD`: Tracked-identity high-water mark (default: 10000)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use submission_rate_limiter::{
    config::{Config, RateLimitConfig},
    handlers::{router, AppState},
    limiter::FixedWindowLimiter,
    metrics::GateMetrics,
    validator::SubmissionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        contact_limit = config.contact.limit,
        contact_window_ms = config.contact.window_ms,
        testimonial_limit = config.testimonial.limit,
        testimonial_window_ms = config.testimonial.window_ms,
        sweep_threshold = config.contact.sweep_threshold,
        "Starting submission rate limiter"
    );

    // Create application state: one limiter per guarded action.
    let state = Arc::new(AppState {
        contact_limiter: FixedWindowLimiter::new(config.contact.clone()),
        testimonial_limiter: FixedWindowLimiter::new(config.testimonial.clone()),
        validator: SubmissionValidator::new(config.validation.clone()),
        metrics: GateMetrics::new()?,
        config: config.clone(),
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let sweep_threshold = env_parse("SWEEP_THRESHOLD").unwrap_or(10_000);
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        contact: RateLimitConfig {
            limit: env_parse("CONTACT_LIMIT").unwrap_or(2),
            window_ms: env_parse("CONTACT_WINDOW_MS").unwrap_or(3_600_000),
            sweep_threshold,
        },
        testimonial: RateLimitConfig {
            limit: env_parse("TESTIMONIAL_LIMIT").unwrap_or(3),
            window_ms: env_parse("TESTIMONIAL_WINDOW_MS").unwrap_or(3_600_000),
            sweep_threshold,
        },
        ..Default::default()
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
