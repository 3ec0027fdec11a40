// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for abuse simulation results.

use std::collections::HashMap;

/// Possible outcomes for a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    RateLimited,
}

/// Collects metrics during an abuse simulation.
#[derive(Debug, Default)]
pub struct AbuseMetrics {
    /// Count of requests by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Count of allowed requests by identity
    allowed_per_identity: HashMap<String, usize>,
}

impl AbuseMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request outcome.
    pub fn record(&mut self, outcome: Outcome, identity: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        if outcome == Outcome::Allowed {
            *self
                .allowed_per_identity
                .entry(identity.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Get total request count.
    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Get block rate (ratio of rate-limited to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        self.count(Outcome::RateLimited) as f64 / total as f64
    }

    /// Allowed requests for one identity.
    pub fn allowed_for(&self, identity: &str) -> usize {
        self.allowed_per_identity
            .get(identity)
            .copied()
            .unwrap_or(0)
    }

    /// Largest number of allowed requests any single identity achieved.
    pub fn max_allowed_per_identity(&self) -> usize {
        self.allowed_per_identity.values().copied().max().unwrap_or(0)
    }

    /// Generate a summary report.
    pub fn report(&self) -> AbuseReport {
        AbuseReport {
            total_requests: self.total_requests(),
            allowed: self.count(Outcome::Allowed),
            rate_limited: self.count(Outcome::RateLimited),
            block_rate: self.block_rate(),
            unique_identities_admitted: self.allowed_per_identity.len(),
            max_allowed_per_identity: self.max_allowed_per_identity(),
        }
    }
}

/// Summary report of an abuse simulation.
#[derive(Debug, Clone)]
pub struct AbuseReport {
    pub total_requests: usize,
    pub allowed: usize,
    pub rate_limited: usize,
    pub block_rate: f64,
    pub unique_identities_admitted: usize,
    pub max_allowed_per_identity: usize,
}

impl std::fmt::Display for AbuseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Abuse Simulation Report ===")?;
        writeln!(f, "Total Requests:     {}", self.total_requests)?;
        writeln!(
            f,
            "Allowed:            {} ({:.1}%)",
            self.allowed,
            self.allowed as f64 / self.total_requests.max(1) as f64 * 100.0
        )?;
        writeln!(f, "Rate Limited:       {}", self.rate_limited)?;
        writeln!(f, "Block Rate:         {:.1}%", self.block_rate * 100.0)?;
        writeln!(
            f,
            "Identities Admitted:{}",
            self.unique_identities_admitted
        )?;
        writeln!(
            f,
            "Max Allowed/Identity: {}",
            self.max_allowed_per_identity
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AbuseMetrics::new();

        metrics.record(Outcome::Allowed, "10.0.0.1");
        metrics.record(Outcome::Allowed, "10.0.0.1");
        metrics.record(Outcome::RateLimited, "10.0.0.1");
        metrics.record(Outcome::Allowed, "10.0.0.2");

        assert_eq!(metrics.total_requests(), 4);
        assert_eq!(metrics.count(Outcome::Allowed), 3);
        assert_eq!(metrics.allowed_for("10.0.0.1"), 2);
        assert_eq!(metrics.max_allowed_per_identity(), 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = AbuseMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Allowed, "10.0.0.1");
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "10.0.0.1");
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
