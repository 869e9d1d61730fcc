mod config;
mod handlers;
mod models;
mod services;
mod webhook; // Bridge webhook + pairing portal

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::MessageHandler;
use services::{BridgeClient, Database, GeminiService, LogWhatsAppClient, WhatsAppService};
use webhook::pairing::PairingState;
use webhook::server::create_webhook_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Sastrería WhatsApp Bot...");

    let config = Config::from_env()?;

    // Catalog lives in the business Postgres (servicios, disponibilidad)
    let db = Arc::new(Database::new(&config.database_url).await?);
    log::info!("✅ PostgreSQL catalog connected");

    let gemini = Arc::new(GeminiService::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    )?);
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let whatsapp: Arc<dyn WhatsAppService> = match &config.bridge_url {
        Some(url) => {
            log::info!("✅ WhatsApp bridge client initialized: {}", url);
            Arc::new(BridgeClient::new(url.clone(), config.bridge_token.clone())?)
        }
        None => {
            log::warn!("⚠️ BRIDGE_URL not set, replies will only be logged");
            Arc::new(LogWhatsAppClient::new())
        }
    };

    let message_handler = Arc::new(MessageHandler::new(db, gemini, whatsapp));
    log::info!("✅ Message handler initialized");

    if config.webhook_secret.is_none() {
        log::warn!("⚠️ WEBHOOK_SECRET not configured, skipping signature verification");
    }

    let pairing = Arc::new(PairingState::new());
    let app = create_webhook_router(message_handler, pairing, config.webhook_secret.clone());

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    log::info!("🌐 HTTP server listening on {}", config.http_addr);
    log::info!("🔑 Pairing QR: http://{}/qr", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("❌ Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await?;

    log::info!("🛑 Shutting down...");

    Ok(())
}
