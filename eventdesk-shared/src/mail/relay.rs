/// HTTP mail relay transport
///
/// Posts each message as JSON (`{from, to, subject, html}`) to a relay
/// endpoint with a bearer token. Any non-2xx response is a transport error.

use std::time::Duration;

use async_trait::async_trait;

use super::{MailError, MailMessage, Mailer};

/// Relay connection settings
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint accepting `POST` with a JSON message body
    pub url: String,

    /// Bearer token sent in the `Authorization` header
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

/// [`Mailer`] delivering through an HTTP relay
#[derive(Debug, Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    config: RelayConfig,
}

impl RelayMailer {
    pub fn new(config: RelayConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut request = self.client.post(&self.config.url).json(message);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Transport(format!("relay responded with {}", status)));
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Mail delivered to relay");
        Ok(())
    }
}
