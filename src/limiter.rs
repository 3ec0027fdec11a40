// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for public submission endpoints.
//!
//! One `FixedWindowLimiter` exists per guarded action (contact send,
//! testimonial submit), each tracking its own identity keyspace:
//!
//! - Contact: 2 submissions per hour per identity (default)
//! - Testimonial: 3 submissions per hour per identity (default)
//!
//! Windows are fixed, not sliding: each identity's quota resets at
//! `first-attempt-time + window`, so a client can spend a full quota at the
//! end of one window and again right after reset. That boundary burst is
//! accepted behavior for these endpoints.

use crate::config::RateLimitConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// The rate-limited operations, each with its own quota and keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardedAction {
    /// Contact-form submission
    Contact,
    /// Testimonial submission
    Testimonial,
}

impl GuardedAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Testimonial => "testimonial",
        }
    }
}

impl std::fmt::Display for GuardedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an admission check.
///
/// Denial is a normal decision value, not an error: callers short-circuit
/// on it without touching delivery or persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The attempt was recorded and may proceed
    Allowed {
        /// Attempts left in the current window after this one
        remaining: u32,
        /// Epoch milliseconds at which the window resets
        reset_at: i64,
    },
    /// The identity is over quota for the current window
    Denied {
        /// Epoch milliseconds at which the window resets
        reset_at: i64,
    },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }

    /// Attempts left in the window; always 0 when denied.
    pub fn remaining(&self) -> u32 {
        match self {
            Decision::Allowed { remaining, .. } => *remaining,
            Decision::Denied { .. } => 0,
        }
    }

    /// Epoch milliseconds at which the identity's window resets.
    pub fn reset_at(&self) -> i64 {
        match self {
            Decision::Allowed { reset_at, .. } | Decision::Denied { reset_at } => *reset_at,
        }
    }
}

/// Per-identity window state.
///
/// A stored record always has `count` in `[1, limit]`; an expired record is
/// replaced wholesale on next use, never decremented or zeroed in place.
#[derive(Debug)]
struct WindowRecord {
    count: u32,
    reset_at: i64,
}

/// Fixed-window admission gate for one guarded action.
///
/// Explicitly constructed and owned (one instance per action, shared via
/// `Arc` by whoever handles requests) rather than module-level global state,
/// so tests can run independent instances side by side.
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl FixedWindowLimiter {
    /// Create a limiter with the given per-action quota configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `identity` may act now and, if so, record the attempt.
    ///
    /// Never fails: every call returns a decision.
    pub fn check_and_record(&self, identity: &str) -> Decision {
        self.check_and_record_at(identity, Utc::now().timestamp_millis())
    }

    /// Clock-injected variant of [`check_and_record`](Self::check_and_record).
    ///
    /// The whole read-modify-write runs under one lock acquisition and never
    /// suspends, so two concurrent attempts from the same identity cannot
    /// both observe `count < limit`.
    pub fn check_and_record_at(&self, identity: &str, now_ms: i64) -> Decision {
        let mut records = self.lock_records();

        // Opportunistic sweep: once the tracked-identity count passes the
        // high-water mark, drop every expired record before the lookup.
        // Bounds memory under identity churn without a background task.
        if records.len() > self.config.sweep_threshold {
            let before = records.len();
            records.retain(|_, record| record.reset_at > now_ms);
            debug!(
                swept = before - records.len(),
                tracked = records.len(),
                "swept expired rate limit records"
            );
        }

        match records.get_mut(identity) {
            Some(record) if now_ms < record.reset_at => {
                if record.count < self.config.limit {
                    record.count += 1;
                    Decision::Allowed {
                        remaining: self.config.limit - record.count,
                        reset_at: record.reset_at,
                    }
                } else {
                    // At limit: leave the record untouched until expiry.
                    debug!(identity, reset_at = record.reset_at, "over quota");
                    Decision::Denied {
                        reset_at: record.reset_at,
                    }
                }
            }
            _ => {
                // First attempt in a fresh window, or the previous window
                // expired (a window is dead at the exact reset instant).
                let reset_at = now_ms + self.config.window_ms as i64;
                records.insert(
                    identity.to_string(),
                    WindowRecord { count: 1, reset_at },
                );
                Decision::Allowed {
                    remaining: self.config.limit - 1,
                    reset_at,
                }
            }
        }
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.lock_records().len()
    }

    fn lock_records(&self) -> MutexGuard<'_, HashMap<String, WindowRecord>> {
        // Recover the guard if a panicking thread poisoned the lock; the
        // map itself stays consistent (single-step mutations only).
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
