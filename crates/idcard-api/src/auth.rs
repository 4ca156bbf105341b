//! # Admin Password Check
//!
//! A single shared password unlocks the admin listing for a session.

use subtle::ConstantTimeEq;

/// Constant-time comparison of the supplied password against the secret.
///
/// Surrounding whitespace in `provided` is ignored. When lengths differ,
/// performs a dummy comparison to avoid leaking length information through
/// timing variance.
pub fn password_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.trim().as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}
