use anyhow::Result;
use std::sync::Arc;

use crate::handlers::menu;
use crate::handlers::router::{route, Trigger};
use crate::models::{IncomingMessage, OutgoingReply};
use crate::services::{AIService, CatalogStore, WhatsAppService};

pub const AI_APOLOGY: &str = "Lo siento, hubo un problema al consultar la IA.";

/// Capability object handed to every per-message task.
pub struct MessageHandler {
    catalog: Arc<dyn CatalogStore>,
    ai: Arc<dyn AIService>,
    whatsapp: Arc<dyn WhatsAppService>,
}

impl MessageHandler {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        ai: Arc<dyn AIService>,
        whatsapp: Arc<dyn WhatsAppService>,
    ) -> Self {
        Self {
            catalog,
            ai,
            whatsapp,
        }
    }

    pub async fn handle_message(&self, message: &IncomingMessage) -> Result<()> {
        log::info!("📨 INCOMING MESSAGE - From: {} | Content: '{}' | At: {}",
                   message.from, message.body, message.timestamp);

        let reply = self.reply_for(&message.body).await;

        if reply.is_empty() {
            log::debug!("No reply for message from {}", message.from);
            return Ok(());
        }

        self.whatsapp.send_messages(&message.from, &reply.segments).await?;
        log::info!("📤 Replied to {}: {}", message.from, reply);

        Ok(())
    }

    /// Runs exactly one handler for the body and returns what it produced.
    pub async fn reply_for(&self, body: &str) -> OutgoingReply {
        let trigger = route(body);
        log::debug!("🔀 Routed {:?} to {:?}", body, trigger);

        match trigger {
            Trigger::Greeting => menu::welcome(),
            Trigger::MenuOption => menu::option_reply(body.trim(), self.catalog.as_ref()).await,
            Trigger::FreeForm => self.free_form_reply(body).await,
        }
    }

    async fn free_form_reply(&self, body: &str) -> OutgoingReply {
        match self.ai.answer(body).await {
            Ok(answer) => OutgoingReply::text(answer),
            Err(e) => {
                log::error!("❌ AI fallback failed: {}", e);
                OutgoingReply::text(AI_APOLOGY)
            }
        }
    }
}
