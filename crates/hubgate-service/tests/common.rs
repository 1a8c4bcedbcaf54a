//! Common test utilities for hubgate integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;

use hubgate_core::{SignatureScheme, Verifier};
use hubgate_service::{create_router, AppState, ServiceConfig};

/// Secret shared between the test sender and the service.
pub const TEST_SECRET: &str = "f00b4r";

/// Path the webhook receiver is mounted on.
pub const WEBHOOK_PATH: &str = "/webhooks/github";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Verifier with the same secret, used to sign test deliveries.
    pub signer: Verifier,
}

impl TestHarness {
    /// Create a harness checking the default `sha1` scheme.
    pub fn new() -> Self {
        Self::with_scheme(SignatureScheme::Sha1)
    }

    /// Create a harness checking `scheme`.
    pub fn with_scheme(scheme: SignatureScheme) -> Self {
        Self::with_config(scheme, 1024 * 1024)
    }

    /// Create a harness checking `scheme` with a body cap of `max_body_bytes`.
    pub fn with_config(scheme: SignatureScheme, max_body_bytes: usize) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            webhook_path: WEBHOOK_PATH.into(),
            webhook_secret: Some(TEST_SECRET.into()),
            signature_scheme: scheme,
            max_body_bytes,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(config).expect("Failed to build app state");
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");
        let signer = Verifier::new(TEST_SECRET).with_scheme(scheme);

        Self { server, signer }
    }

    /// Signature header value for `body`.
    pub fn sign(&self, body: &str) -> String {
        self.signer.sign(body.as_bytes())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
