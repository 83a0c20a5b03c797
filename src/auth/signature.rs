//! Request signing for the Shopee partner API.
//!
//! Every call to the open platform carries an HMAC-SHA256 signature computed
//! over a canonical concatenation of request fields. Two forms exist:
//!
//! - [`sign`] for partner-level calls (authorization, token exchange,
//!   token refresh), signing `partner_id + path + timestamp`;
//! - [`sign_with_token`] for shop-scoped calls, signing
//!   `partner_id + path + timestamp + access_token + shop_id`.
//!
//! Numeric fields are rendered as base-10 strings with no separators, and
//! the digest is returned as lowercase hex, matching what the upstream API
//! verifies.
//!
//! Both functions are pure and deterministic given their inputs, which keeps
//! signing trivially testable with known-answer vectors.
//!
//! # Example
//!
//! ```rust
//! use shopee_partner_api::auth::signature::sign;
//!
//! let sig = sign(2_013_772, "/api/v2/shop/auth_partner", 1_700_000_000, "test-partner-key");
//! assert_eq!(sig.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 signature for the given message.
///
/// The signature is returned as a lowercase hexadecimal string, the format
/// the Shopee open platform expects in the `sign` query parameter.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic because
/// HMAC-SHA256 accepts keys of any length.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Signs a partner-level request (no access token).
///
/// The canonical string is `partner_id + path + timestamp` with the numeric
/// fields in base 10. Used for the authorization URL, the code exchange, and
/// the token refresh endpoints.
///
/// # Example
///
/// ```rust
/// use shopee_partner_api::auth::signature::sign;
///
/// let sig = sign(1, "/api/v2/auth/token/get", 1_700_000_000, "key");
/// assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
/// ```
#[must_use]
pub fn sign(partner_id: u64, path: &str, timestamp: i64, key: &str) -> String {
    let base = format!("{partner_id}{path}{timestamp}");
    compute_signature(&base, key)
}

/// Signs a shop-scoped request.
///
/// The canonical string is
/// `partner_id + path + timestamp + access_token + shop_id`, in that order.
/// Used for every authenticated call against shop data.
#[must_use]
pub fn sign_with_token(
    partner_id: u64,
    path: &str,
    timestamp: i64,
    access_token: &str,
    shop_id: u64,
    key: &str,
) -> String {
    let base = format!("{partner_id}{path}{timestamp}{access_token}{shop_id}");
    compute_signature(&base, key)
}

/// Performs constant-time comparison of two strings.
///
/// Used for security-sensitive comparisons like inbound API-key validation
/// to prevent timing attacks.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // ConstantTimeEq handles different lengths securely
    a_bytes.ct_eq(b_bytes).into()
}

/// Returns the current Unix timestamp in seconds.
///
/// All signatures embed this value; the upstream API rejects requests whose
/// timestamp drifts too far from its own clock.
#[must_use]
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
