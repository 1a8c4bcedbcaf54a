//! Gating downstream handlers behind signature verification.
//!
//! Two adapters over [`Verifier::authenticate`]:
//!
//! - [`GateLayer`] / [`Gate`]: a tower layer and service for wrapping any
//!   downstream service (`Router::route_layer`, `ServiceBuilder`, ...).
//! - [`require_signature`]: an axum middleware function for
//!   `axum::middleware::from_fn_with_state`.
//!
//! Either way downstream is only called for verified requests; every
//! rejection is answered with the status and text of its [`VerifyError`].
//!
//! [`VerifyError`]: crate::VerifyError

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::future::{self, BoxFuture, Ready};
use tower::{Layer, Service};

use crate::verifier::Verifier;

/// Tower layer that wraps services in a [`Gate`].
#[derive(Debug, Clone)]
pub struct GateLayer {
    verifier: Verifier,
}

impl GateLayer {
    /// Create a layer verifying with `verifier`.
    #[must_use]
    pub fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }
}

impl<S> Layer<S> for GateLayer {
    type Service = Gate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Gate::new(self.verifier.clone(), inner)
    }
}

/// Service that authenticates each request before passing it downstream.
#[derive(Debug, Clone)]
pub struct Gate<S> {
    verifier: Verifier,
    inner: S,
}

impl<S> Gate<S> {
    /// Gate `inner` behind `verifier`.
    #[must_use]
    pub fn new(verifier: Verifier, inner: S) -> Self {
        Self { verifier, inner }
    }
}

impl<S> Service<Request> for Gate<S>
where
    S: Service<Request> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let verifier = self.verifier.clone();
        // Keep the instance that was polled ready, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match verifier.authenticate(request).await {
                Ok(request) => inner
                    .call(request)
                    .await
                    .map(IntoResponse::into_response),
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Downstream for callers that only want the verification side effect.
///
/// Answers every request with an empty `200 OK`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accept;

impl Service<Request> for Accept {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _request: Request) -> Self::Future {
        future::ready(Ok(StatusCode::OK.into_response()))
    }
}

/// Axum middleware running [`Verifier::authenticate`] before `next`.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/webhooks/github", any(receive))
///     .route_layer(middleware::from_fn_with_state(verifier, require_signature));
/// ```
pub async fn require_signature(
    State(verifier): State<Verifier>,
    request: Request,
    next: Next,
) -> Response {
    match verifier.authenticate(request).await {
        Ok(request) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}
