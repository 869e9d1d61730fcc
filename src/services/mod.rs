pub mod ai_service;
pub mod catalog;
pub mod database;
pub mod gemini; // Google Gemini (generateContent)
pub mod whatsapp;

pub use ai_service::AIService;
pub use catalog::CatalogStore;
pub use database::Database;
pub use gemini::GeminiService;
pub use whatsapp::{BridgeClient, LogWhatsAppClient, WhatsAppService};

use std::time::Duration;

/// Upper bound for one Gemini or bridge call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
