// ============================
// crates/backend-lib/src/digest.rs
// ============================
//! Password digest computation and verification.
//!
//! The stored digest is a single-pass, unsalted, lowercase-hex hash. SHA-1
//! is the default so digests written by earlier deployments keep verifying;
//! it is cryptographically weak and kept only for compatibility. New
//! deployments can select SHA-256 through the `digest` setting.
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use sha2::Sha256;

/// Digest algorithm for stored passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Legacy 160-bit digest, compatible with existing user records
    #[default]
    Sha1,
    /// 256-bit digest for fresh deployments
    Sha256,
}

/// Hash a plaintext password into its lowercase hex digest
pub fn hash_password(algorithm: DigestAlgorithm, plain: &str) -> String {
    match algorithm {
        DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(plain.as_bytes())),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(plain.as_bytes())),
    }
}

/// Verify a plaintext password against a stored digest
pub fn verify_password(algorithm: DigestAlgorithm, stored: &str, plain: &str) -> bool {
    let computed = hash_password(algorithm, plain);
    constant_time_eq(computed.as_bytes(), stored.as_bytes())
}

/// Constant-time byte slice comparison.
///
/// The comparison time depends only on the length of the slices, not on
/// their contents. Length is not secret; mismatched lengths return early.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let result = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));

    result == 0
}
