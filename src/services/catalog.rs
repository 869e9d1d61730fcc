use anyhow::Result;

use crate::models::{AvailabilitySlot, ServiceDescription, ServicePrice};

/// Read-only access to the tailoring catalog (services + availability).
/// Implemented by `Database` in production and by in-memory fakes in tests.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn service_descriptions(&self) -> Result<Vec<ServiceDescription>>;
    async fn service_prices(&self) -> Result<Vec<ServicePrice>>;
    async fn availability(&self) -> Result<Vec<AvailabilitySlot>>;
}
