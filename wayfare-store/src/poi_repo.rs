use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_core::inventory::{NewPoi, Poi, PoiFilter, PoiPatch};
use wayfare_core::repository::PoiRepository;
use wayfare_core::StoreResult;

use crate::error::map_sqlx;

pub struct PostgresPoiRepository {
    pool: PgPool,
}

impl PostgresPoiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PoiRow {
    id: Uuid,
    name: String,
    category: String,
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PoiRow> for Poi {
    fn from(row: PoiRow) -> Self {
        Poi {
            id: row.id,
            name: row.name,
            category: row.category,
            city: row.city,
            latitude: row.latitude,
            longitude: row.longitude,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POI_COLUMNS: &str =
    "id, name, category, city, latitude, longitude, description, created_at, updated_at";

#[async_trait]
impl PoiRepository for PostgresPoiRepository {
    async fn list(&self, filter: &PoiFilter) -> StoreResult<Vec<Poi>> {
        let rows = sqlx::query_as::<_, PoiRow>(&format!(
            r#"
            SELECT {POI_COLUMNS}
            FROM pois
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY name
            "#
        ))
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Poi::from).collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Poi>> {
        let row =
            sqlx::query_as::<_, PoiRow>(&format!("SELECT {POI_COLUMNS} FROM pois WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(row.map(Poi::from))
    }

    async fn create(&self, poi: &NewPoi) -> StoreResult<Poi> {
        let row = sqlx::query_as::<_, PoiRow>(&format!(
            r#"
            INSERT INTO pois (id, name, category, city, latitude, longitude, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {POI_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&poi.name)
        .bind(&poi.category)
        .bind(poi.city.as_deref())
        .bind(poi.latitude)
        .bind(poi.longitude)
        .bind(poi.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: &PoiPatch) -> StoreResult<Option<Poi>> {
        let row = sqlx::query_as::<_, PoiRow>(&format!(
            r#"
            UPDATE pois
            SET name = COALESCE($2::text, name),
                category = COALESCE($3::text, category),
                city = COALESCE($4::text, city),
                latitude = COALESCE($5::float8, latitude),
                longitude = COALESCE($6::float8, longitude),
                description = COALESCE($7::text, description),
                updated_at = now()
            WHERE id = $1
            RETURNING {POI_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.category.as_deref())
        .bind(patch.city.as_deref())
        .bind(patch.latitude)
        .bind(patch.longitude)
        .bind(patch.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Poi::from))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM pois WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(deleted)
    }
}
