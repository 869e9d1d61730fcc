use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

use super::{http_client, REQUEST_TIMEOUT};

// Outbound side of the messaging transport
#[async_trait::async_trait]
pub trait WhatsAppService: Send + Sync {
    async fn send_message(&self, to: &str, message: &str) -> Result<()>;

    /// Send segments one after the other, in order.
    /// Stops at the first failed segment so the sender never sees a gap.
    async fn send_messages(&self, to: &str, messages: &[String]) -> Result<()> {
        for message in messages {
            self.send_message(to, message).await?;
        }
        Ok(())
    }
}

/// Dry-run transport: logs replies instead of delivering them.
/// Used when no bridge URL is configured.
pub struct LogWhatsAppClient;

#[async_trait::async_trait]
impl WhatsAppService for LogWhatsAppClient {
    async fn send_message(&self, to: &str, message: &str) -> Result<()> {
        log::info!("📱 [dry-run] Message to {}: {}", to, message);
        Ok(())
    }
}

impl LogWhatsAppClient {
    pub fn new() -> Self {
        Self
    }
}

/// Client for the WhatsApp Web bridge that holds the paired session.
pub struct BridgeClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    text: &'a str,
}

impl BridgeClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: http_client(timeout)?,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl WhatsAppService for BridgeClient {
    async fn send_message(&self, to: &str, message: &str) -> Result<()> {
        let mut request = self
            .client
            .post(self.api_url("/send"))
            .json(&SendRequest { to, text: message });

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Bridge send error ({}): {}", status, error_text);
            anyhow::bail!("Bridge send error ({}): {}", status, error_text);
        }

        log::debug!("✅ Message delivered to bridge for {}", to);
        Ok(())
    }
}
