//! Webhook gate integration tests.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestHarness, WEBHOOK_PATH};
use hubgate_core::SignatureScheme;

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn disallowed_methods_get_405() {
    let harness = TestHarness::new();

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = harness.server.method(method, WEBHOOK_PATH).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_text("Method not allowed");
    }
}

#[tokio::test]
async fn head_gets_405() {
    let harness = TestHarness::new();

    let response = harness.server.method(Method::HEAD, WEBHOOK_PATH).await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn disallowed_method_wins_over_valid_signature() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .put(WEBHOOK_PATH)
        .add_header("x-hub-signature", harness.sign("foobar"))
        .text("foobar")
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn empty_post_is_missing_body() {
    let harness = TestHarness::new();

    let response = harness.server.post(WEBHOOK_PATH).await;

    response.assert_status_bad_request();
    response.assert_text("Missing Body");
}

#[tokio::test]
async fn empty_body_is_checked_before_header() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", "dummyvalue")
        .await;

    response.assert_status_bad_request();
    response.assert_text("Missing Body");
}

#[tokio::test]
async fn missing_header_is_rejected() {
    let harness = TestHarness::new();

    let response = harness.server.post(WEBHOOK_PATH).text("foobar").await;

    response.assert_status_bad_request();
    response.assert_text("Missing Header");
}

#[tokio::test]
async fn empty_header_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", "")
        .text("foobar")
        .await;

    response.assert_status_bad_request();
    response.assert_text("Missing Header");
}

#[tokio::test]
async fn invalid_signature_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", "dummyvalue")
        .text("foobar")
        .await;

    response.assert_status_bad_request();
    response.assert_text("Invalid Signature");
}

#[tokio::test]
async fn signature_for_different_body_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", harness.sign("foobaz"))
        .text("foobar")
        .await;

    response.assert_status_bad_request();
    response.assert_text("Invalid Signature");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let harness = TestHarness::new();
    let body = "x".repeat(1024 * 1024 + 1);

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", harness.sign(&body))
        .text(body)
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("length limit exceeded"));
}

#[tokio::test]
async fn configured_limit_above_default_accepts_large_delivery() {
    let harness = TestHarness::with_config(SignatureScheme::Sha1, 8 * 1024 * 1024);
    let body = "x".repeat(3 * 1024 * 1024);

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", harness.sign(&body))
        .text(body)
        .await;

    response.assert_status_ok();
    response.assert_text("OK");
}

// ============================================================================
// Accepted deliveries
// ============================================================================

#[tokio::test]
async fn valid_signature_reaches_receiver() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", harness.sign("foobar"))
        .add_header("x-github-event", "push")
        .add_header("x-github-delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958")
        .text("foobar")
        .await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn header_name_is_case_insensitive() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("X-HUB-SIGNATURE", harness.sign("foobar"))
        .text("foobar")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn replayed_delivery_gets_same_outcome() {
    let harness = TestHarness::new();
    let signature = harness.sign(r#"{"zen":"Keep it logically awesome."}"#);

    for _ in 0..2 {
        let response = harness
            .server
            .post(WEBHOOK_PATH)
            .add_header("x-hub-signature", &signature)
            .text(r#"{"zen":"Keep it logically awesome."}"#)
            .await;

        response.assert_status_ok();
        response.assert_text("OK");
    }
}

// ============================================================================
// SHA-256 scheme
// ============================================================================

#[tokio::test]
async fn sha256_scheme_accepts_its_header() {
    let harness = TestHarness::with_scheme(SignatureScheme::Sha256);

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature-256", harness.sign("foobar"))
        .text("foobar")
        .await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn sha256_scheme_ignores_sha1_header() {
    let harness = TestHarness::with_scheme(SignatureScheme::Sha256);
    let sha1 = TestHarness::new();

    let response = harness
        .server
        .post(WEBHOOK_PATH)
        .add_header("x-hub-signature", sha1.sign("foobar"))
        .text("foobar")
        .await;

    response.assert_status_bad_request();
    response.assert_text("Missing Header");
}
