//! Service configuration.

use std::fmt;
use std::path::Path;

use hubgate_core::{ParseSchemeError, SignatureScheme, Verifier, DEFAULT_BODY_LIMIT};
use serde::Deserialize;

/// Locations searched for the webhook secrets file, in order.
const SECRET_PATHS: [&str; 2] = [".secrets/github.json", "../.secrets/github.json"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No webhook secret was configured.
    #[error("webhook secret not configured: set GITHUB_WEBHOOK_SECRET or provide .secrets/github.json")]
    MissingSecret,

    /// `SIGNATURE_SCHEME` names an unknown scheme.
    #[error(transparent)]
    InvalidScheme(#[from] ParseSchemeError),
}

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path the webhook receiver is mounted on (default: "/webhooks/github").
    pub webhook_path: String,

    /// Shared webhook secret.
    pub webhook_secret: Option<String>,

    /// Signature scheme deliveries are checked against (default: sha1).
    pub signature_scheme: SignatureScheme,

    /// Maximum webhook body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Webhook secrets file structure.
#[derive(Debug, Deserialize)]
struct GithubSecrets {
    webhook_secret: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and the secrets file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| std::env::var(name).ok(), &SECRET_PATHS)
    }

    /// Load configuration from `var` lookups, reading the secret from the
    /// first readable file in `secret_paths` before falling back to
    /// `GITHUB_WEBHOOK_SECRET`.
    pub fn from_source(
        var: impl Fn(&str) -> Option<String>,
        secret_paths: &[&str],
    ) -> Result<Self, ConfigError> {
        let signature_scheme = match var("SIGNATURE_SCHEME") {
            Some(name) => name.parse()?,
            None => SignatureScheme::default(),
        };

        Ok(Self {
            listen_addr: var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into()),
            webhook_path: var("WEBHOOK_PATH").unwrap_or_else(|| "/webhooks/github".into()),
            webhook_secret: load_webhook_secret(secret_paths)
                .or_else(|| var("GITHUB_WEBHOOK_SECRET")),
            signature_scheme,
            max_body_bytes: var("MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BODY_LIMIT),
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Build the verifier for incoming deliveries.
    pub fn verifier(&self) -> Result<Verifier, ConfigError> {
        let secret = self
            .webhook_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        Ok(Verifier::new(secret)
            .with_scheme(self.signature_scheme)
            .with_body_limit(self.max_body_bytes))
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("listen_addr", &self.listen_addr)
            .field("webhook_path", &self.webhook_path)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("signature_scheme", &self.signature_scheme)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            webhook_path: "/webhooks/github".into(),
            webhook_secret: None,
            signature_scheme: SignatureScheme::default(),
            max_body_bytes: DEFAULT_BODY_LIMIT,
            request_timeout_seconds: 30,
        }
    }
}

/// Load the webhook secret from the first secrets file found.
fn load_webhook_secret(paths: &[&str]) -> Option<String> {
    for path in paths {
        if let Ok(secrets) = load_secrets_file::<GithubSecrets>(path) {
            tracing::info!(path = %path, "Loaded webhook secret from file");
            return Some(secrets.webhook_secret);
        }
    }

    tracing::debug!("Webhook secrets file not found, using environment variables");
    None
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
