// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: Apache-2.0

//! Abuse pattern configurations for security testing.
//!
//! Patterns drive the limiter deterministically: request `i` arrives at
//! `i * step_ms` on a synthetic clock, from identity `i % unique_identities`.

/// Abuse pattern configuration.
#[derive(Debug, Clone)]
pub struct AbuseConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of distinct client identities cycling through the requests
    pub unique_identities: usize,
    /// Synthetic clock advance between requests, in milliseconds
    pub step_ms: i64,
}

impl Default for AbuseConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_identities: 1,
            step_ms: 10,
        }
    }
}

/// Predefined abuse patterns.
impl AbuseConfig {
    /// Single identity flood - one client hammering an endpoint.
    pub fn single_identity_flood() -> Self {
        Self {
            total_requests: 200,
            unique_identities: 1,
            step_ms: 5,
        }
    }

    /// Distributed probe - many identities, a handful of requests each.
    pub fn distributed_probe() -> Self {
        Self {
            total_requests: 500,
            unique_identities: 100,
            step_ms: 2,
        }
    }

    /// Identity churn - every request from a fresh identity (spoofed
    /// forwarded headers), stressing the sweep's memory bound.
    pub fn identity_churn() -> Self {
        Self {
            total_requests: 25_000,
            unique_identities: 25_000,
            step_ms: 1,
        }
    }

    /// Unresolved herd - every request lands in the shared sentinel bucket.
    pub fn unknown_herd() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 1,
            step_ms: 100,
        }
    }

    /// Total synthetic duration of the pattern in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.total_requests as i64 * self.step_ms
    }

    /// Requests each identity sends over the whole pattern.
    pub fn requests_per_identity(&self) -> usize {
        self.total_requests / self.unique_identities
    }
}
