use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_core::inventory::{NewVehicle, Vehicle, VehicleFilter, VehiclePatch};
use wayfare_core::repository::VehicleRepository;
use wayfare_core::StoreResult;

use crate::error::map_sqlx;

pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    model: String,
    vendor: String,
    city: String,
    daily_rate: i64,
    seats: i32,
    transmission: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            model: row.model,
            vendor: row.vendor,
            city: row.city,
            daily_rate: row.daily_rate,
            seats: row.seats,
            transmission: row.transmission,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const VEHICLE_COLUMNS: &str =
    "id, model, vendor, city, daily_rate, seats, transmission, created_at, updated_at";

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn list(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE ($1::text IS NULL OR city = $1)
            ORDER BY daily_rate
            "#
        ))
        .bind(filter.city.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Vehicle::from))
    }

    async fn create(&self, vehicle: &NewVehicle) -> StoreResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (id, model, vendor, city, daily_rate, seats, transmission)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&vehicle.model)
        .bind(&vehicle.vendor)
        .bind(&vehicle.city)
        .bind(vehicle.daily_rate)
        .bind(vehicle.seats)
        .bind(&vehicle.transmission)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET model = COALESCE($2::text, model),
                vendor = COALESCE($3::text, vendor),
                city = COALESCE($4::text, city),
                daily_rate = COALESCE($5::bigint, daily_rate),
                seats = COALESCE($6::int, seats),
                transmission = COALESCE($7::text, transmission),
                updated_at = now()
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.model.as_deref())
        .bind(patch.vendor.as_deref())
        .bind(patch.city.as_deref())
        .bind(patch.daily_rate)
        .bind(patch.seats)
        .bind(patch.transmission.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Vehicle::from))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        let deleted =
            sqlx::query_scalar::<_, Uuid>("DELETE FROM vehicles WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(deleted)
    }
}
