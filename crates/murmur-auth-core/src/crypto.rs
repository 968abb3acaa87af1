//! Comparison and fingerprinting helpers for secret material
//!
//! Secrets (passwords, bearer tokens) are compared in constant time and
//! only ever logged as a truncated one-way fingerprint.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hex characters of the SHA-256 digest kept in a fingerprint
const FINGERPRINT_LEN: usize = 12;

/// Constant-time byte slice comparison.
///
/// Slices of different length compare unequal without inspecting contents;
/// length is not treated as secret.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time string comparison.
#[inline]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

/// Short, stable, non-reversible label for a token, safe to log
pub fn token_fingerprint(token: &str) -> String {
    let mut hex = hex::encode(Sha256::digest(token.as_bytes()));
    hex.truncate(FINGERPRINT_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello world", b"hello world"));
        assert!(!constant_time_eq(b"hello world", b"hello worle"));
        assert!(!constant_time_eq(b"hello", b"hello world"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_constant_time_str_eq_is_case_sensitive() {
        assert!(constant_time_str_eq("secret", "secret"));
        assert!(!constant_time_str_eq("secret", "Secret"));
    }

    #[test]
    fn test_token_fingerprint() {
        let a = token_fingerprint("some-token");
        assert_eq!(a, token_fingerprint("some-token"));
        assert_ne!(a, token_fingerprint("other-token"));
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert!(!a.contains("some-token"));
    }
}
