//! Signature schemes.
//!
//! A scheme pairs a hash with the header that carries it and the prefix of
//! the header value. `sha1` is what the hosting service has always sent in
//! `X-Hub-Signature`; `sha256` covers its newer `X-Hub-Signature-256` header
//! and is only used when a deployment selects it explicitly.

use std::fmt;
use std::str::FromStr;

use crate::crypto::{hmac_sha1_hex, hmac_sha256_hex};

/// Header carrying the HMAC-SHA1 signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Header carrying the HMAC-SHA256 signature.
pub const SIGNATURE_256_HEADER: &str = "X-Hub-Signature-256";

/// The hash, header and value prefix a [`Verifier`](crate::Verifier) checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureScheme {
    /// `X-Hub-Signature: sha1=<hex>`.
    #[default]
    Sha1,
    /// `X-Hub-Signature-256: sha256=<hex>`.
    Sha256,
}

impl SignatureScheme {
    /// Name of the request header holding the signature.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::Sha1 => SIGNATURE_HEADER,
            Self::Sha256 => SIGNATURE_256_HEADER,
        }
    }

    /// Prefix of the header value, including the `=`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1=",
            Self::Sha256 => "sha256=",
        }
    }

    /// Compute the full header value for `body` signed with `secret`.
    #[must_use]
    pub fn sign(self, secret: &[u8], body: &[u8]) -> String {
        let digest = match self {
            Self::Sha1 => hmac_sha1_hex(secret, body),
            Self::Sha256 => hmac_sha256_hex(secret, body),
        };
        format!("{}{digest}", self.prefix())
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown scheme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signature scheme: {0} (expected sha1 or sha256)")]
pub struct ParseSchemeError(pub String);

impl FromStr for SignatureScheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            _ => Err(ParseSchemeError(s.to_string())),
        }
    }
}
