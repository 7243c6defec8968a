use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_core::inventory::{Flight, FlightFilter, FlightPatch, NewFlight};
use wayfare_core::repository::FlightRepository;
use wayfare_core::StoreResult;

use crate::error::map_sqlx;

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_number: String,
    airline: String,
    origin: String,
    destination: String,
    departure_at: DateTime<Utc>,
    arrival_at: DateTime<Utc>,
    price: i64,
    seats_available: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            airline: row.airline,
            origin: row.origin,
            destination: row.destination,
            departure_at: row.departure_at,
            arrival_at: row.arrival_at,
            price: row.price,
            seats_available: row.seats_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const FLIGHT_COLUMNS: &str = "id, flight_number, airline, origin, destination, departure_at, arrival_at, price, seats_available, created_at, updated_at";

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn list(&self, filter: &FlightFilter) -> StoreResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            r#"
            SELECT {FLIGHT_COLUMNS}
            FROM flights
            WHERE ($1::text IS NULL OR origin = $1)
              AND ($2::text IS NULL OR destination = $2)
            ORDER BY departure_at
            "#
        ))
        .bind(filter.origin.as_deref())
        .bind(filter.destination.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Flight::from))
    }

    async fn create(&self, flight: &NewFlight) -> StoreResult<Flight> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            r#"
            INSERT INTO flights (id, flight_number, airline, origin, destination, departure_at, arrival_at, price, seats_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {FLIGHT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&flight.flight_number)
        .bind(&flight.airline)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure_at)
        .bind(flight.arrival_at)
        .bind(flight.price)
        .bind(flight.seats_available)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: &FlightPatch) -> StoreResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            r#"
            UPDATE flights
            SET flight_number = COALESCE($2::text, flight_number),
                airline = COALESCE($3::text, airline),
                origin = COALESCE($4::text, origin),
                destination = COALESCE($5::text, destination),
                departure_at = COALESCE($6::timestamptz, departure_at),
                arrival_at = COALESCE($7::timestamptz, arrival_at),
                price = COALESCE($8::bigint, price),
                seats_available = COALESCE($9::int, seats_available),
                updated_at = now()
            WHERE id = $1
            RETURNING {FLIGHT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.flight_number.as_deref())
        .bind(patch.airline.as_deref())
        .bind(patch.origin.as_deref())
        .bind(patch.destination.as_deref())
        .bind(patch.departure_at)
        .bind(patch.arrival_at)
        .bind(patch.price)
        .bind(patch.seats_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Flight::from))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM flights WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(deleted)
    }
}
