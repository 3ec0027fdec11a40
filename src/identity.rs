// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identity resolution from forwarded headers.
//!
//! The service sits behind a reverse proxy, so the peer address is the
//! proxy's; the real client is carried in `x-forwarded-for` (first entry)
//! or `x-real-ip`. The identity is an opaque, unauthenticated string used
//! only as a rate-limiting key.

use axum::http::HeaderMap;

/// Sentinel identity shared by every caller whose address cannot be
/// resolved. Unresolvable callers compete for one quota rather than
/// getting unlimited (or zero) attempts each.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Resolve the rate-limiting identity for a request.
///
/// Priority: first `x-forwarded-for` entry, then `x-real-ip`, then
/// [`UNKNOWN_IDENTITY`].
pub fn resolve_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    UNKNOWN_IDENTITY.to_string()
}
