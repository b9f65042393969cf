use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{finish_transaction, parse_id, CarStore, StoreError};
use crate::constants::API_NAME;
use crate::models::{Car, CarRequest, Engine};

const ENTITY: &str = "car";

const SELECT_CAR: &str =
    "SELECT c.id, c.name, c.year, c.brand, c.fuel_type, c.price, c.engine_id, c.created_at, c.updated_at \
     FROM car c";

const SELECT_CAR_WITH_ENGINE: &str =
    "SELECT c.id, c.name, c.year, c.brand, c.fuel_type, c.price, c.engine_id, c.created_at, c.updated_at, \
            e.displacement, e.no_of_cylinders, e.car_range, \
            e.created_at AS engine_created_at, e.updated_at AS engine_updated_at \
     FROM car c LEFT JOIN engine e ON e.id = c.engine_id";

/// A `car` row, optionally joined with its engine. The engine columns are
/// absent from plain selects and NULL when the engine row is gone.
#[derive(Debug, FromRow)]
struct CarRow {
    id: Uuid,
    name: String,
    year: String,
    brand: String,
    fuel_type: String,
    price: f64,
    engine_id: Uuid,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    displacement: Option<i64>,
    #[sqlx(default)]
    no_of_cylinders: Option<i64>,
    #[sqlx(default)]
    car_range: Option<i64>,
    #[sqlx(default)]
    engine_created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    engine_updated_at: Option<DateTime<Utc>>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: row.id,
            name: row.name,
            year: row.year,
            fuel_type: row.fuel_type,
            price: row.price,
            engine: Engine {
                id: row.engine_id,
                displacement: row.displacement.unwrap_or_default(),
                no_of_cylinders: row.no_of_cylinders.unwrap_or_default(),
                car_range: row.car_range.unwrap_or_default(),
                created_at: row.engine_created_at,
                updated_at: row.engine_updated_at,
            },
            brand: row.brand,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for CarRepository {
    #[tracing::instrument(name = "car_store.get_by_id", skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Car, StoreError> {
        let car_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let query = format!("{} WHERE c.id = $1", SELECT_CAR_WITH_ENGINE);
        let result = async {
            sqlx::query_as::<_, CarRow>(&query)
                .bind(car_id)
                .fetch_optional(&mut *tx)
                .await?
                .map(Car::from)
                .ok_or_else(|| StoreError::not_found(ENTITY, id))
        }
        .await;

        finish_transaction(tx, result, "get_car_by_id").await
    }

    #[tracing::instrument(name = "car_store.get_by_brand", skip(self))]
    async fn get_by_brand(
        &self,
        brand: &str,
        include_engine: bool,
    ) -> Result<Vec<Car>, StoreError> {
        let select = if include_engine {
            SELECT_CAR_WITH_ENGINE
        } else {
            SELECT_CAR
        };
        let query = format!("{} WHERE c.brand = $1 ORDER BY c.created_at, c.id", select);
        let mut tx = self.pool.begin().await?;

        let result = async {
            let rows = sqlx::query_as::<_, CarRow>(&query)
                .bind(brand)
                .fetch_all(&mut *tx)
                .await?;
            Ok::<_, StoreError>(rows.into_iter().map(Car::from).collect::<Vec<_>>())
        }
        .await;

        finish_transaction(tx, result, "get_car_by_brand").await
    }

    #[tracing::instrument(name = "car_store.create", skip(self))]
    async fn create(&self, request: &CarRequest) -> Result<Car, StoreError> {
        let car = Car::new(request);
        let mut tx = self.pool.begin().await?;

        let result = async {
            sqlx::query(
                "INSERT INTO car (id, name, year, brand, fuel_type, engine_id, price, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(car.id)
            .bind(&car.name)
            .bind(&car.year)
            .bind(&car.brand)
            .bind(&car.fuel_type)
            .bind(car.engine.id)
            .bind(car.price)
            .bind(car.created_at)
            .bind(car.updated_at)
            .execute(&mut *tx)
            .await?;
            Ok::<_, StoreError>(car)
        }
        .await;

        let car = finish_transaction(tx, result, "create_car").await?;
        tracing::info!("{} Created car: {}", API_NAME, car.id);
        Ok(car)
    }

    #[tracing::instrument(name = "car_store.update", skip(self))]
    async fn update(&self, id: &str, request: &CarRequest) -> Result<Car, StoreError> {
        let car_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let query = format!("{} WHERE c.id = $1", SELECT_CAR_WITH_ENGINE);
        let result = async {
            let updated = sqlx::query(
                "UPDATE car SET name = $2, year = $3, brand = $4, fuel_type = $5, engine_id = $6, \
                 price = $7, updated_at = $8 \
                 WHERE id = $1",
            )
            .bind(car_id)
            .bind(&request.name)
            .bind(&request.year)
            .bind(&request.brand)
            .bind(&request.fuel_type)
            .bind(request.engine.id)
            .bind(request.price)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(StoreError::not_found(ENTITY, id));
            }

            // Re-read so the engine comes from its own row, as in `get_by_id`.
            sqlx::query_as::<_, CarRow>(&query)
                .bind(car_id)
                .fetch_optional(&mut *tx)
                .await?
                .map(Car::from)
                .ok_or_else(|| StoreError::not_found(ENTITY, id))
        }
        .await;

        let car = finish_transaction(tx, result, "update_car").await?;
        tracing::info!("{} Updated car: {}", API_NAME, car.id);
        Ok(car)
    }

    #[tracing::instrument(name = "car_store.delete", skip(self))]
    async fn delete(&self, id: &str) -> Result<Car, StoreError> {
        let car_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let query = format!("{} WHERE c.id = $1", SELECT_CAR_WITH_ENGINE);
        let result = async {
            let car = sqlx::query_as::<_, CarRow>(&query)
                .bind(car_id)
                .fetch_optional(&mut *tx)
                .await?
                .map(Car::from)
                .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

            let deleted = sqlx::query("DELETE FROM car WHERE id = $1")
                .bind(car_id)
                .execute(&mut *tx)
                .await?;

            // Removed by a concurrent request between the read and the delete.
            if deleted.rows_affected() == 0 {
                return Err(StoreError::not_found(ENTITY, id));
            }
            Ok::<_, StoreError>(car)
        }
        .await;

        let car = finish_transaction(tx, result, "delete_car").await?;
        tracing::info!("{} Deleted car: {}", API_NAME, car.id);
        Ok(car)
    }
}
