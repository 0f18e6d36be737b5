//! Verification code delivery for whisperbox.
//!
//! The service hands a freshly issued code to a [`Notifier`] and moves
//! on; the notifier decides how it reaches the account holder. The
//! default just logs the code, which is enough for development and for
//! deployments that scrape logs. Production points the webhook notifier
//! at a mail-sending relay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::config::NotifierConfig;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// User agent string for webhook delivery.
const USER_AGENT: &str = "whisperbox/0.1";

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The delivery channel could not be set up.
    #[error("notifier setup failed: {0}")]
    Setup(String),

    /// The code never reached the relay.
    #[error("verification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers verification codes to account holders.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the notifier name, used for logging.
    fn name(&self) -> &str;

    /// Deliver a verification code to the given address.
    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), NotifyError>;
}

/// Notifier that writes codes to the application log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), NotifyError> {
        info!(email = %email, username = %username, code = %code, "verification code issued");
        Ok(())
    }
}

/// Notifier that POSTs codes to an external relay as JSON.
///
/// The relay owns the actual email template and sending; whisperbox only
/// tells it who needs which code.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl WebhookNotifier {
    /// Create a webhook notifier for the given relay URL.
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NotifyError::Setup(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), NotifyError> {
        let mut request = self.client.post(&self.url).json(&json!({
            "email": email,
            "username": username,
            "code": code,
        }));

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(format!("failed to reach relay: {}", e)))?;

        if !response.status().is_success() {
            return Err(NotifyError::Delivery(format!(
                "relay returned HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Build a notifier from configuration.
///
/// Config validation has already rejected unknown modes and webhook
/// configs without a URL.
pub fn build_notifier(config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    match config.mode.as_str() {
        "webhook" => {
            if config.webhook_url.is_empty() {
                return Err(NotifyError::Setup(
                    "webhook notifier requires a URL".to_string(),
                ));
            }
            let api_key = (!config.api_key.is_empty()).then(|| config.api_key.clone());
            let notifier =
                WebhookNotifier::new(config.webhook_url.clone(), api_key, config.timeout_secs)?;
            Ok(Arc::new(notifier))
        }
        _ => Ok(Arc::new(LogNotifier)),
    }
}
