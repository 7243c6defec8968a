use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use wayfare_core::pricing::PriceRecord;
use wayfare_core::repository::PriceRepository;
use wayfare_core::{StoreError, StoreResult};
use wayfare_shared::{VenueKind, VenueRef};

use crate::error::map_sqlx;

pub struct PostgresPriceRepository {
    pool: PgPool,
}

impl PostgresPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct PriceRow {
    kind: String,
    external_id: i64,
    display_name: Option<String>,
    base_price: i64,
    created_at: DateTime<Utc>,
}

impl PriceRow {
    fn into_record(self) -> StoreResult<PriceRecord> {
        let kind: VenueKind = self
            .kind
            .parse()
            .map_err(|e| StoreError::backend(e))?;

        Ok(PriceRecord {
            venue: VenueRef::new(kind, self.external_id),
            display_name: self.display_name,
            base_price: self.base_price,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl PriceRepository for PostgresPriceRepository {
    async fn find_price(&self, venue: &VenueRef) -> StoreResult<Option<PriceRecord>> {
        let row = sqlx::query_as::<_, PriceRow>(
            r#"
            SELECT kind, external_id, display_name, base_price, created_at
            FROM hotel_prices
            WHERE kind = $1 AND external_id = $2
            "#,
        )
        .bind(venue.kind.as_str())
        .bind(venue.external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PriceRow::into_record).transpose()
    }

    async fn insert_price(
        &self,
        venue: &VenueRef,
        display_name: Option<&str>,
        base_price: i64,
    ) -> StoreResult<PriceRecord> {
        // No ON CONFLICT here: the unique constraint violation is the signal
        // the ensure-or-create workflow branches on.
        let row = sqlx::query_as::<_, PriceRow>(
            r#"
            INSERT INTO hotel_prices (kind, external_id, display_name, base_price)
            VALUES ($1, $2, $3, $4)
            RETURNING kind, external_id, display_name, base_price, created_at
            "#,
        )
        .bind(venue.kind.as_str())
        .bind(venue.external_id)
        .bind(display_name)
        .bind(base_price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.into_record()
    }
}
