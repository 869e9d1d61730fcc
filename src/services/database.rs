use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use super::CatalogStore;
use crate::models::{AvailabilitySlot, ServiceDescription, ServicePrice};

/// Postgres-backed catalog. The `servicios` and `disponibilidad` tables are
/// owned by the business backend; this bot never writes to them.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }
}

#[async_trait::async_trait]
impl CatalogStore for Database {
    // NULL columns surface as decode errors, never as panics
    async fn service_descriptions(&self) -> Result<Vec<ServiceDescription>> {
        let rows = sqlx::query(
            r#"
            SELECT nombre, COALESCE(descripcion, '')
            FROM servicios
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let services = rows
            .into_iter()
            .map(|row| -> Result<ServiceDescription, sqlx::Error> {
                Ok(ServiceDescription {
                    name: row.try_get(0)?,
                    description: row.try_get(1)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(services)
    }

    async fn service_prices(&self) -> Result<Vec<ServicePrice>> {
        // precio may be NUMERIC on the backend side
        let rows = sqlx::query(
            r#"
            SELECT nombre, COALESCE(precio, 0)::float8
            FROM servicios
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let prices = rows
            .into_iter()
            .map(|row| -> Result<ServicePrice, sqlx::Error> {
                Ok(ServicePrice {
                    name: row.try_get(0)?,
                    price: row.try_get(1)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(prices)
    }

    async fn availability(&self) -> Result<Vec<AvailabilitySlot>> {
        // hour columns are sent as stored (TIME renders as "09:00:00")
        let rows = sqlx::query(
            r#"
            SELECT dia::text, hora_inicio::text, hora_fin::text
            FROM disponibilidad
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let slots = rows
            .into_iter()
            .map(|row| -> Result<AvailabilitySlot, sqlx::Error> {
                Ok(AvailabilitySlot {
                    day: row.try_get(0)?,
                    start: row.try_get(1)?,
                    end: row.try_get(2)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(slots)
    }
}
