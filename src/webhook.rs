use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::{IncomingMessage, PairingCode};

pub mod pairing;

/// Events posted by the WhatsApp Web bridge.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "lowercase")]
pub enum BridgeEvent {
    Message(MessagePayload),
    Pairing(PairingPayload),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessagePayload {
    pub id: String,
    pub from: String,
    #[serde(default)]
    pub body: String,
    /// Unix seconds, when the bridge knows it
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PairingPayload {
    pub code: String,
    /// Base64 PNG of the QR
    #[serde(default)]
    pub image: Option<String>,
}

impl MessagePayload {
    pub fn into_incoming(self) -> IncomingMessage {
        let timestamp = self
            .timestamp
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now);

        IncomingMessage {
            from: self.from,
            body: self.body,
            timestamp,
        }
    }
}

impl PairingPayload {
    pub fn into_pairing(self, received_at: DateTime<Utc>) -> PairingCode {
        // a broken image still leaves the code usable
        let image_png = self.image.and_then(|encoded| {
            let encoded = encoded.strip_prefix("data:image/png;base64,").unwrap_or(&encoded);
            match general_purpose::STANDARD.decode(encoded) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    log::warn!("⚠️ Pairing image is not valid base64: {}", e);
                    None
                }
            }
        });

        PairingCode {
            code: self.code,
            image_png,
            received_at,
        }
    }
}

/// Verify webhook signature using HMAC-SHA256
fn verify_webhook_signature(payload: &str, signature: &str, secret: &str) -> bool {
    type HmacSha256 = Hmac<Sha256>;

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };

    mac.update(payload.as_bytes());
    let result = mac.finalize();
    let expected_signature = hex::encode(result.into_bytes());

    let provided_signature = signature.strip_prefix("sha256=").unwrap_or(signature);

    expected_signature == provided_signature.to_lowercase()
}

pub mod server {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Router,
    };
    use std::sync::Arc;

    use super::pairing::{create_pairing_router, PairingState};
    use crate::handlers::MessageHandler;

    pub struct AppState {
        pub message_handler: Arc<MessageHandler>,
        pub pairing: Arc<PairingState>,
        pub webhook_secret: Option<String>,
    }

    pub fn create_webhook_router(
        message_handler: Arc<MessageHandler>,
        pairing: Arc<PairingState>,
        webhook_secret: Option<String>,
    ) -> Router {
        let state = Arc::new(AppState {
            message_handler,
            pairing: pairing.clone(),
            webhook_secret,
        });

        Router::new()
            .route("/webhook/whatsapp", post(webhook_handler))
            .route("/health", get(health_check))
            .with_state(state)
            .merge(create_pairing_router(pairing))
    }

    fn signature_header(headers: &HeaderMap) -> Option<&str> {
        ["x-hub-signature-256", "x-signature"]
            .iter()
            .find_map(|name| headers.get(*name))
            .and_then(|value| value.to_str().ok())
    }

    async fn webhook_handler(
        headers: HeaderMap,
        State(state): State<Arc<AppState>>,
        body: String,
    ) -> StatusCode {
        log::debug!("🔔 Webhook received: {}", body.chars().take(500).collect::<String>());

        match (&state.webhook_secret, signature_header(&headers)) {
            (Some(secret), Some(signature)) => {
                // raw body, re-serialized JSON would not match
                if !verify_webhook_signature(&body, signature, secret) {
                    log::error!("❌ Webhook signature verification failed");
                    return StatusCode::UNAUTHORIZED;
                }
                log::debug!("✅ Webhook signature verified");
            }
            (Some(_), None) => {
                log::error!("❌ Unsigned webhook request rejected");
                return StatusCode::UNAUTHORIZED;
            }
            (None, Some(_)) => {
                log::warn!("⚠️ Signature provided but no webhook secret configured");
            }
            (None, None) => {}
        }

        let event: BridgeEvent = match serde_json::from_str(&body) {
            Ok(event) => event,
            Err(e) => {
                log::error!("❌ Failed to parse webhook payload: {}", e);
                return StatusCode::UNPROCESSABLE_ENTITY;
            }
        };

        match event {
            BridgeEvent::Message(payload) => {
                log::info!("💬 Message {} from {}", payload.id, payload.from);
                let handler = state.message_handler.clone();
                let message = payload.into_incoming();

                // one task per inbound message; the bridge gets its 200 right away
                tokio::spawn(async move {
                    if let Err(e) = handler.handle_message(&message).await {
                        log::error!("❌ Failed to reply to {}: {}", message.from, e);
                    }
                });
            }
            BridgeEvent::Pairing(payload) => {
                state.pairing.update(payload.into_pairing(Utc::now())).await;
            }
        }

        StatusCode::OK
    }

    async fn health_check() -> &'static str {
        "OK"
    }
}
