// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

/// Generate a pool of client identities (forwarded-IP strings).
pub fn generate_identities(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use the 10.x.x.x private range
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{a}.{b}.{c}")
        })
        .collect()
}

/// Generate email values that must fail the structural check.
pub fn generate_bad_emails() -> Vec<&'static str> {
    vec![
        "plainaddress",
        "@example.com",
        "user@",
        "user@nodot",
        "user@@example.com",
        "user name@example.com",
        "user@.example.com",
        "user@example.",
    ]
}

/// Generate website values that must be rejected by the validator.
/// Rejection reasons mirror the accepted set (http/https with a host):
/// - not-a-url / empty: parse failure
/// - ftp/javascript/file/data: disallowed scheme
/// - https://: no host
pub fn generate_malformed_websites() -> Vec<&'static str> {
    vec![
        "not-a-url",
        "   ",
        "ftp://wrong-scheme.com/",
        "javascript:alert(1)",
        "data:text/html,<script>",
        "file:///etc/passwd",
        "https://",
        "://missing-scheme.com/",
    ]
}

/// Testimonial ratings outside the accepted 1..=5 range.
pub fn generate_bad_ratings() -> Vec<u8> {
    vec![0, 6, 7, 100, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identities() {
        let identities = generate_identities(256);
        assert_eq!(identities.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = identities.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_identities_look_like_addresses() {
        let identities = generate_identities(10);
        assert!(identities[0].starts_with("10."));
        assert_eq!(identities[0].split('.').count(), 4);
    }
}
