use crate::models::{AvailabilitySlot, OutgoingReply, ServiceDescription, ServicePrice};
use crate::services::CatalogStore;

pub const GREETING: &str = "👋 Hola dime qué necesitas para hoy.";
pub const MENU: &str = "Estos son nuestros servicios:\n\
1️⃣ confeccion de pantalón a medida\n\
2️⃣ Toda clase de arreglos de sastrería\n\
3️⃣ Consultas de precios y disponibilidad";

pub const TAILORED_PANTS_PRICE: &str = "El valor es 80.000 pesos colombianos.";
pub const SERVICES_UNAVAILABLE: &str = "No se pudieron obtener los servicios en este momento.";
pub const PRICES_UNAVAILABLE: &str = "No se pudieron obtener los precios en este momento.";

/// Greeting followed by the options menu. No I/O.
pub fn welcome() -> OutgoingReply {
    OutgoingReply::segments([GREETING, MENU])
}

/// Answer for a menu selection ("1", "2" or "3", already trimmed).
/// Catalog errors never escape: they become the fixed unavailable texts.
pub async fn option_reply(option: &str, catalog: &dyn CatalogStore) -> OutgoingReply {
    match option {
        "1" => OutgoingReply::text(TAILORED_PANTS_PRICE),
        "2" => services_reply(catalog).await,
        "3" => prices_reply(catalog).await,
        other => {
            log::warn!("⚠️ Unknown menu option: {:?}", other);
            OutgoingReply::default()
        }
    }
}

async fn services_reply(catalog: &dyn CatalogStore) -> OutgoingReply {
    match catalog.service_descriptions().await {
        Ok(services) if !services.is_empty() => OutgoingReply::text(format_services(&services)),
        Ok(_) => {
            log::warn!("⚠️ Catalog returned no services");
            OutgoingReply::text(SERVICES_UNAVAILABLE)
        }
        Err(e) => {
            log::error!("❌ Failed to query services: {}", e);
            OutgoingReply::text(SERVICES_UNAVAILABLE)
        }
    }
}

async fn prices_reply(catalog: &dyn CatalogStore) -> OutgoingReply {
    let (prices, availability) = tokio::join!(catalog.service_prices(), catalog.availability());

    let prices = match prices {
        Ok(prices) if !prices.is_empty() => prices,
        Ok(_) => {
            log::warn!("⚠️ Catalog returned no prices");
            return OutgoingReply::text(PRICES_UNAVAILABLE);
        }
        Err(e) => {
            log::error!("❌ Failed to query prices: {}", e);
            return OutgoingReply::text(PRICES_UNAVAILABLE);
        }
    };

    // availability is optional, the block is just left out
    let availability = availability.unwrap_or_else(|e| {
        log::error!("❌ Failed to query availability: {}", e);
        Vec::new()
    });

    OutgoingReply::text(format_prices(&prices, &availability))
}

pub fn format_services(services: &[ServiceDescription]) -> String {
    let list = services
        .iter()
        .map(|s| format!("• {}: {}", s.name, s.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Estos son nuestros servicios:\n{}", list)
}

pub fn format_prices(prices: &[ServicePrice], availability: &[AvailabilitySlot]) -> String {
    let list = prices
        .iter()
        .map(|s| format!("• {}: ${}", s.name, format_price(s.price)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = format!("Precios de nuestros servicios:\n{}", list);

    if !availability.is_empty() {
        let slots = availability
            .iter()
            .map(|d| format!("• {}: {} a {}", d.day, d.start, d.end))
            .collect::<Vec<_>>()
            .join("\n");
        text.push_str("\n\n*Disponibilidad:*\n");
        text.push_str(&slots);
    }

    text
}

/// 10000.0 -> "10000", 12.5 -> "12.5"
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        price.to_string()
    }
}
