use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_core::repository::ReservationRepository;
use wayfare_core::reservation::{ProductKind, Reservation, ReservationStatus};
use wayfare_core::{StoreError, StoreResult};

use crate::error::map_sqlx;

pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    user_id: Uuid,
    product_kind: String,
    product_ref: String,
    total_price: i64,
    details: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReservationRow {
    fn into_reservation(self) -> StoreResult<Reservation> {
        let product_kind: ProductKind = self
            .product_kind
            .parse()
            .map_err(|e: String| StoreError::Backend(e.into()))?;
        let status: ReservationStatus = self
            .status
            .parse()
            .map_err(|e: String| StoreError::Backend(e.into()))?;

        Ok(Reservation {
            id: self.id,
            user_id: self.user_id,
            product_kind,
            product_ref: self.product_ref,
            total_price: self.total_price,
            details: self.details,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const RESERVATION_COLUMNS: &str =
    "id, user_id, product_kind, product_ref, total_price, details, status, created_at, updated_at";

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn create(&self, reservation: &Reservation) -> StoreResult<()> {
        // total_price goes in as computed by the caller and is never written
        // again by any statement in this repository.
        sqlx::query(
            r#"
            INSERT INTO reservations (id, user_id, product_kind, product_ref, total_price, details, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.user_id)
        .bind(reservation.product_kind.as_str())
        .bind(&reservation.product_ref)
        .bind(reservation.total_price)
        .bind(&reservation.details)
        .bind(reservation.status.as_str())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ReservationRow::into_reservation).transpose()
    }

    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(ReservationRow::into_reservation)
            .collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> StoreResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            UPDATE reservations
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ReservationRow::into_reservation).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        let deleted =
            sqlx::query_scalar::<_, Uuid>("DELETE FROM reservations WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(deleted)
    }
}
