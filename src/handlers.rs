// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the submission rate limiter service.
//!
//! The service sits in front of the portfolio backend and gates its two
//! public mutation endpoints (contact send, testimonial submit). A request
//! is first admitted against the per-action quota, then its payload is
//! validated; delivery and persistence stay upstream.

use crate::config::Config;
use crate::identity::{resolve_identity, UNKNOWN_IDENTITY};
use crate::limiter::{Decision, FixedWindowLimiter, GuardedAction};
use crate::metrics::{GateMetrics, Outcome};
use crate::validator::SubmissionValidator;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Machine-readable reason code for quota denials.
pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
/// Machine-readable reason code for payload rejections.
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";

/// Shared application state.
pub struct AppState {
    pub contact_limiter: FixedWindowLimiter,
    pub testimonial_limiter: FixedWindowLimiter,
    pub validator: SubmissionValidator,
    pub metrics: GateMetrics,
    pub config: Config,
}

impl AppState {
    fn limiter_for(&self, action: GuardedAction) -> &FixedWindowLimiter {
        match action {
            GuardedAction::Contact => &self.contact_limiter,
            GuardedAction::Testimonial => &self.testimonial_limiter,
        }
    }
}

/// Contact-form submission payload.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Testimonial submission payload.
#[derive(Debug, Deserialize)]
pub struct TestimonialRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Response body for the submission endpoints.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Attempts left in the caller's current window
    pub remaining: u32,
    /// Epoch milliseconds at which the caller's window resets
    pub reset_time: i64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Admission check request (external auth mode).
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub action: GuardedAction,
    #[serde(default)]
    pub ip: String,
}

/// Admission check response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "submission-rate-limiter",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Gate a request under the given action, recording the attempt on allow.
///
/// Returns the decision, or a ready 429 response when the caller is over
/// quota. The quota check runs before payload validation: an attempt is an
/// attempt, well-formed or not.
fn gate(state: &AppState, action: GuardedAction, headers: &HeaderMap) -> Result<Decision, Response> {
    let identity = resolve_identity(headers);
    let limiter = state.limiter_for(action);
    let decision = limiter.check_and_record(&identity);
    state
        .metrics
        .set_tracked(action.as_str(), limiter.tracked_identities());

    match decision {
        Decision::Allowed { remaining, .. } => {
            debug!(%action, identity, remaining, "request admitted");
            Ok(decision)
        }
        Decision::Denied { reset_at } => {
            state.metrics.record(action.as_str(), Outcome::Denied);
            info!(%action, identity, reset_at, "request over quota");
            Err((
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs(reset_at).to_string())],
                Json(SubmissionResponse {
                    success: false,
                    error: Some(RATE_LIMIT_EXCEEDED),
                    detail: None,
                    remaining: 0,
                    reset_time: reset_at,
                }),
            )
                .into_response())
        }
    }
}

fn accepted(decision: Decision) -> Response {
    (
        StatusCode::OK,
        [("X-RateLimit-Remaining", decision.remaining().to_string())],
        Json(SubmissionResponse {
            success: true,
            error: None,
            detail: None,
            remaining: decision.remaining(),
            reset_time: decision.reset_at(),
        }),
    )
        .into_response()
}

fn rejected(decision: Decision, detail: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(SubmissionResponse {
            success: false,
            error: Some(VALIDATION_FAILED),
            detail: Some(detail),
            remaining: decision.remaining(),
            reset_time: decision.reset_at(),
        }),
    )
        .into_response()
}

/// Accept a contact-form submission (2 per hour per client by default).
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ContactRequest>,
) -> Response {
    let decision = match gate(&state, GuardedAction::Contact, &headers) {
        Ok(decision) => decision,
        Err(denied) => return denied,
    };

    let validation = state
        .validator
        .validate_contact(&req.name, &req.email, &req.message);
    if let Some(err) = validation.error() {
        state
            .metrics
            .record(GuardedAction::Contact.as_str(), Outcome::Invalid);
        info!(action = %GuardedAction::Contact, error = %err, "submission rejected");
        return rejected(decision, err.to_string());
    }

    state
        .metrics
        .record(GuardedAction::Contact.as_str(), Outcome::Allowed);
    accepted(decision)
}

/// Accept a testimonial submission (3 per hour per client by default).
pub async fn submit_testimonial(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<TestimonialRequest>,
) -> Response {
    let decision = match gate(&state, GuardedAction::Testimonial, &headers) {
        Ok(decision) => decision,
        Err(denied) => return denied,
    };

    let validation = state.validator.validate_testimonial(
        &req.name,
        &req.quote,
        req.website.as_deref(),
        req.rating,
    );
    if let Some(err) = validation.error() {
        state
            .metrics
            .record(GuardedAction::Testimonial.as_str(), Outcome::Invalid);
        info!(action = %GuardedAction::Testimonial, error = %err, "submission rejected");
        return rejected(decision, err.to_string());
    }

    state
        .metrics
        .record(GuardedAction::Testimonial.as_str(), Outcome::Allowed);
    accepted(decision)
}

/// Check admission for an externally resolved identity.
///
/// The portfolio backend posts `{action, ip}` and applies the decision
/// itself. Always 200 so the caller can read the body.
pub async fn check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckRequest>,
) -> impl IntoResponse {
    let identity = if req.ip.trim().is_empty() {
        // Unresolvable callers share one bucket rather than failing.
        UNKNOWN_IDENTITY
    } else {
        req.ip.trim()
    };

    let limiter = state.limiter_for(req.action);
    let decision = limiter.check_and_record(identity);
    state
        .metrics
        .set_tracked(req.action.as_str(), limiter.tracked_identities());

    match decision {
        Decision::Allowed { remaining, reset_at } => {
            state.metrics.record(req.action.as_str(), Outcome::Allowed);
            debug!(action = %req.action, identity, remaining, "check allowed");
            Json(CheckResponse {
                allowed: true,
                remaining,
                reset_time: reset_at,
                retry_after_secs: None,
            })
        }
        Decision::Denied { reset_at } => {
            state.metrics.record(req.action.as_str(), Outcome::Denied);
            info!(action = %req.action, identity, reset_at, "check denied");
            Json(CheckResponse {
                allowed: false,
                remaining: 0,
                reset_time: reset_at,
                retry_after_secs: Some(retry_after_secs(reset_at)),
            })
        }
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(%err, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the service router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact", post(submit_contact))
        .route("/testimonial", post(submit_testimonial))
        .route("/check", post(check));

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(
            // Public browser forms post here from the portfolio frontend.
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Whole seconds until `reset_at`, rounded up; the Retry-After hint.
fn retry_after_secs(reset_at: i64) -> u64 {
    let delta_ms = reset_at - Utc::now().timestamp_millis();
    if delta_ms <= 0 {
        0
    } else {
        (delta_ms as u64).div_ceil(1000)
    }
}
