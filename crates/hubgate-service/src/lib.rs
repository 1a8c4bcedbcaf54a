//! Hubgate HTTP Service.
//!
//! Hosts the webhook signature gate in front of a delivery receiver:
//!
//! - `GET /health` - liveness
//! - `POST /webhooks/github` - deliveries, verified against
//!   `X-Hub-Signature` before the receiver runs
//!
//! # Configuration
//!
//! See [`ServiceConfig`]. The service refuses to start without a webhook
//! secret.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use routes::create_router;
pub use state::AppState;
