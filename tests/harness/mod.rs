// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: Apache-2.0

//! Test harness for submission gate abuse simulation.
//!
//! This module provides utilities for simulating abusive traffic patterns
//! against the rate limiter to validate the admission controls.

pub mod abuse;
pub mod generators;
pub mod metrics;
