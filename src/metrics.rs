// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the submission gate.
//!
//! The registry is owned by the application state rather than registered
//! globally, so independent instances can coexist in tests.

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Admission outcomes recorded per request.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// Admitted and payload valid
    Allowed,
    /// Over quota
    Denied,
    /// Admitted but payload rejected by validation
    Invalid,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Invalid => "invalid",
        }
    }
}

/// Metrics for the submission gate.
pub struct GateMetrics {
    registry: Registry,
    submissions_total: IntCounterVec,
    tracked_identities: IntGaugeVec,
}

impl GateMetrics {
    /// Create and register the gate metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let submissions_total = IntCounterVec::new(
            Opts::new(
                "portfolio_submissions_total",
                "Submission attempts by guarded action and admission outcome",
            ),
            &["action", "outcome"],
        )?;
        let tracked_identities = IntGaugeVec::new(
            Opts::new(
                "portfolio_tracked_identities",
                "Identities currently tracked per guarded action",
            ),
            &["action"],
        )?;

        let registry = Registry::new();
        registry.register(Box::new(submissions_total.clone()))?;
        registry.register(Box::new(tracked_identities.clone()))?;

        Ok(Self {
            registry,
            submissions_total,
            tracked_identities,
        })
    }

    /// Record one admission outcome for an action.
    pub fn record(&self, action: &str, outcome: Outcome) {
        self.submissions_total
            .with_label_values(&[action, outcome.as_str()])
            .inc();
    }

    /// Update the tracked-identity gauge for an action.
    pub fn set_tracked(&self, action: &str, count: usize) {
        self.tracked_identities
            .with_label_values(&[action])
            .set(count as i64);
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
