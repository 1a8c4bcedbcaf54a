//! Signature verification gate for source-control webhook deliveries.
//!
//! Deliveries carry an HMAC of their raw body, keyed with a secret shared
//! between the hosting service and the receiver:
//!
//! ```text
//! X-Hub-Signature: sha1=<40 lowercase hex chars>
//! ```
//!
//! This crate provides:
//!
//! - **Verification**: [`Verifier`], checking method, body presence, header
//!   presence and a constant-time signature comparison
//! - **Gating**: [`GateLayer`] / [`Gate`] and the [`require_signature`]
//!   middleware, which only let verified requests through
//! - **Errors**: [`VerifyError`], mapped to `405`/`400` plain-text responses
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{routing::any, Router};
//! use hubgate_core::Verifier;
//!
//! let verifier = Verifier::new("my-webhook-secret");
//! let app: Router = Router::new()
//!     // `any`, so the gate answers non-POST methods itself
//!     .route("/webhooks/github", any(|| async { "OK" }))
//!     .route_layer(verifier.layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod crypto;
pub mod error;
pub mod gate;
pub mod scheme;
pub mod verifier;

pub use error::{Result, VerifyError};
pub use gate::{require_signature, Accept, Gate, GateLayer};
pub use scheme::{ParseSchemeError, SignatureScheme, SIGNATURE_256_HEADER, SIGNATURE_HEADER};
pub use verifier::{Verifier, WebhookSecret, DEFAULT_BODY_LIMIT};
