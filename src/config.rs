// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the submission rate limiter.
//!
//! Defaults match the quotas the portfolio enforces in production:
//! 2 contact submissions and 3 testimonial submissions per hour per client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the submission rate limiter service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Quota for contact-form submissions (default: 2 per hour)
    #[serde(default = "RateLimitConfig::contact")]
    pub contact: RateLimitConfig,

    /// Quota for testimonial submissions (default: 3 per hour)
    #[serde(default = "RateLimitConfig::testimonial")]
    pub testimonial: RateLimitConfig,

    /// Payload validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Per-action fixed-window quota, set once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed per window (default: 3)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Window length in milliseconds (default: 3600000, one hour)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Tracked-identity high-water mark above which expired records are
    /// swept inline (default: 10000)
    #[serde(default = "default_sweep_threshold")]
    pub sweep_threshold: usize,
}

/// Validation limits for submission payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum length of the submitter's name (default: 100)
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum length of a message or testimonial quote (default: 5000)
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_limit() -> u32 {
    3
}

fn default_window_ms() -> u64 {
    3_600_000 // one hour
}

fn default_sweep_threshold() -> usize {
    10_000
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_message_len() -> usize {
    5_000
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            contact: RateLimitConfig::contact(),
            testimonial: RateLimitConfig::testimonial(),
            validation: ValidationConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_ms: default_window_ms(),
            sweep_threshold: default_sweep_threshold(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_message_len: default_max_message_len(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Production quota for contact-form submissions: 2 per hour.
    pub fn contact() -> Self {
        Self {
            limit: 2,
            ..Default::default()
        }
    }

    /// Production quota for testimonial submissions: 3 per hour.
    pub fn testimonial() -> Self {
        Self {
            limit: 3,
            ..Default::default()
        }
    }

    /// Get the window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
