//! Webhook signature verification.
//!
//! A [`Verifier`] owns the shared secret and decides whether a delivery was
//! signed by its holder. Checks run cheapest first: method, declared body
//! length and header presence are settled before the body is read and
//! hashed.

use std::fmt;
use std::sync::Arc;

use axum::body::{Body, HttpBody as _};
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use secrecy::{ExposeSecret, Secret};

use crate::crypto::constant_time_eq;
use crate::error::{Result, VerifyError};
use crate::gate::{Accept, Gate, GateLayer};
use crate::scheme::SignatureScheme;

/// Default cap on buffered body bytes (1MB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// The shared webhook secret.
///
/// Zeroed on drop and redacted from `Debug` output.
pub struct WebhookSecret(Secret<Vec<u8>>);

impl WebhookSecret {
    /// Wrap raw secret bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Secret::new(bytes))
    }

    fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret([REDACTED])")
    }
}

impl From<Vec<u8>> for WebhookSecret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for WebhookSecret {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Verifies webhook deliveries against a shared secret.
///
/// Cheap to clone; clones share the secret. Holds no per-request state, so a
/// single instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Verifier {
    secret: Arc<WebhookSecret>,
    scheme: SignatureScheme,
    body_limit: usize,
}

impl Verifier {
    /// Create a verifier for the default `sha1` scheme.
    #[must_use]
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            scheme: SignatureScheme::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Check signatures with `scheme` instead of the default.
    #[must_use]
    pub fn with_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Cap the number of body bytes buffered for verification.
    #[must_use]
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// The scheme this verifier checks.
    #[must_use]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Header value a sender would attach to `body`.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> String {
        self.scheme.sign(self.secret.expose(), body)
    }

    /// Authenticate a request.
    ///
    /// Consumes the body to compute the digest. On success the request is
    /// handed back with the buffered bytes as its body, so whatever runs next
    /// can read it again.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in order: [`VerifyError::MethodNotAllowed`],
    /// [`VerifyError::MissingBody`], [`VerifyError::MissingHeader`],
    /// [`VerifyError::Io`] when the body cannot be read (or exceeds the body
    /// limit), then [`VerifyError::InvalidSignature`].
    pub async fn authenticate(&self, request: Request) -> Result<Request> {
        let (parts, body) = request.into_parts();

        let declared_len = declared_length(&parts.headers, &body);
        let signature = self.precheck(&parts.method, &parts.headers, declared_len)?;

        let bytes = axum::body::to_bytes(body, self.body_limit)
            .await
            .map_err(VerifyError::Io)?;

        self.check_signature(signature, &bytes)?;

        tracing::debug!(
            scheme = %self.scheme,
            body_len = bytes.len(),
            "Webhook signature verified"
        );

        Ok(Request::from_parts(parts, Body::from(bytes)))
    }

    /// Verify an already-buffered request.
    ///
    /// Same checks as [`authenticate`](Self::authenticate); an empty `body`
    /// counts as a missing body.
    ///
    /// # Errors
    ///
    /// Any [`VerifyError`] except [`VerifyError::Io`].
    pub fn verify(&self, method: &Method, headers: &HeaderMap, body: &[u8]) -> Result<()> {
        let signature = self.precheck(method, headers, u64::try_from(body.len()).ok())?;
        self.check_signature(signature, body)
    }

    /// Wrap `downstream` so it only sees verified requests.
    #[must_use]
    pub fn gate<S>(&self, downstream: S) -> Gate<S> {
        Gate::new(self.clone(), downstream)
    }

    /// A gate with nothing behind it: verified requests get an empty `200`.
    #[must_use]
    pub fn gate_only(&self) -> Gate<Accept> {
        self.gate(Accept)
    }

    /// A tower layer applying this verifier.
    #[must_use]
    pub fn layer(&self) -> GateLayer {
        GateLayer::new(self.clone())
    }

    fn precheck<'h>(
        &self,
        method: &Method,
        headers: &'h HeaderMap,
        declared_len: Option<u64>,
    ) -> Result<&'h HeaderValue> {
        if *method != Method::POST {
            return Err(VerifyError::MethodNotAllowed);
        }

        if declared_len == Some(0) {
            return Err(VerifyError::MissingBody);
        }

        headers
            .get(self.scheme.header_name())
            .filter(|value| !value.is_empty())
            .ok_or(VerifyError::MissingHeader)
    }

    fn check_signature(&self, signature: &HeaderValue, body: &[u8]) -> Result<()> {
        let expected = self.sign(body);

        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(VerifyError::InvalidSignature)
        }
    }
}

/// Length the request advertises, without reading the body.
///
/// `Content-Length` wins when present; otherwise the body's exact size hint.
/// `None` means unknown (e.g. chunked), which does not count as empty.
fn declared_length(headers: &HeaderMap, body: &Body) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| body.size_hint().exact())
}
