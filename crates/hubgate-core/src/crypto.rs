//! Cryptographic utilities for webhook verification.
//!
//! HMAC digests over raw delivery bodies, hex-encoded the way the
//! `X-Hub-Signature` family of headers carries them, plus a constant-time
//! comparison for checking a supplied signature against the expected one.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA1 and return the lowercase hex-encoded result.
///
/// # Returns
///
/// A hex-encoded string of the HMAC-SHA1 result (40 characters).
///
/// # Panics
///
/// Never in practice. HMAC accepts keys of any size per RFC 2104, so the
/// `expect` only guards a broken `Hmac` implementation.
#[must_use]
pub fn hmac_sha1_hex(secret: &[u8], message: &[u8]) -> String {
    // INVARIANT: HMAC accepts keys of any size per RFC 2104.
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC-SHA1 accepts any key size");
    mac.update(message);

    hex::encode(mac.finalize().into_bytes())
}

/// Compute HMAC-SHA256 and return the lowercase hex-encoded result (64 characters).
///
/// # Panics
///
/// Never in practice, see [`hmac_sha1_hex`].
#[must_use]
pub fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> String {
    // INVARIANT: HMAC accepts keys of any size per RFC 2104.
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts any key size");
    mac.update(message);

    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time byte comparison.
///
/// Cost does not depend on the position of the first differing byte. Inputs
/// of different length compare unequal; the length itself is not secret.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
