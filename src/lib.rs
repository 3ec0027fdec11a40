// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission Rate Limiter
//!
//! This crate provides ingress-level rate limiting for the portfolio's
//! public submission endpoints:
//!
//! - Contact-form submissions: 2 per hour per client (default)
//! - Testimonial submissions: 3 per hour per client (default)
//! - Client identity from `x-forwarded-for` / `x-real-ip`, with a shared
//!   `"unknown"` bucket for unresolvable callers
//! - Fixed windows, counted in memory per process
//! - Inline sweep of expired records past a tracked-identity high-water mark
//! - Payload validation (required fields, email shape, website URL, rating)

pub mod config;
pub mod handlers;
pub mod identity;
pub mod limiter;
pub mod metrics;
pub mod validator;

pub use config::{Config, RateLimitConfig};
pub use limiter::{Decision, FixedWindowLimiter, GuardedAction};
pub use validator::{SubmissionValidator, ValidationResult};
