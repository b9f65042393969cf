use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::{finish_transaction, parse_id, EngineStore, StoreError};
use crate::constants::API_NAME;
use crate::models::{Engine, EngineRequest};

const ENTITY: &str = "engine";

const SELECT_ENGINE_BY_ID: &str = "SELECT id, displacement, no_of_cylinders, car_range, created_at, updated_at \
     FROM engine WHERE id = $1";

#[derive(Clone)]
pub struct EngineRepository {
    pool: PgPool,
}

impl EngineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngineStore for EngineRepository {
    #[tracing::instrument(name = "engine_store.get_by_id", skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Engine, StoreError> {
        let engine_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let result = async {
            sqlx::query_as::<_, Engine>(SELECT_ENGINE_BY_ID)
                .bind(engine_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found(ENTITY, id))
        }
        .await;

        finish_transaction(tx, result, "get_engine_by_id").await
    }

    #[tracing::instrument(name = "engine_store.create", skip(self))]
    async fn create(&self, request: &EngineRequest) -> Result<Engine, StoreError> {
        let engine = Engine::new(request);
        let mut tx = self.pool.begin().await?;

        let result = async {
            sqlx::query(
                "INSERT INTO engine (id, displacement, no_of_cylinders, car_range, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(engine.id)
            .bind(engine.displacement)
            .bind(engine.no_of_cylinders)
            .bind(engine.car_range)
            .bind(engine.created_at)
            .bind(engine.updated_at)
            .execute(&mut *tx)
            .await?;
            Ok::<_, StoreError>(engine)
        }
        .await;

        let engine = finish_transaction(tx, result, "create_engine").await?;
        tracing::info!("{} Created engine: {}", API_NAME, engine.id);
        Ok(engine)
    }

    #[tracing::instrument(name = "engine_store.update", skip(self))]
    async fn update(&self, id: &str, request: &EngineRequest) -> Result<Engine, StoreError> {
        let engine_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let result = async {
            sqlx::query_as::<_, Engine>(
                "UPDATE engine SET displacement = $2, no_of_cylinders = $3, car_range = $4, updated_at = $5 \
                 WHERE id = $1 \
                 RETURNING id, displacement, no_of_cylinders, car_range, created_at, updated_at",
            )
            .bind(engine_id)
            .bind(request.displacement)
            .bind(request.no_of_cylinders)
            .bind(request.car_range)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
        }
        .await;

        let engine = finish_transaction(tx, result, "update_engine").await?;
        tracing::info!("{} Updated engine: {}", API_NAME, engine.id);
        Ok(engine)
    }

    #[tracing::instrument(name = "engine_store.delete", skip(self))]
    async fn delete(&self, id: &str) -> Result<Engine, StoreError> {
        let engine_id = parse_id(ENTITY, id)?;
        let mut tx = self.pool.begin().await?;

        let result = async {
            let engine = sqlx::query_as::<_, Engine>(SELECT_ENGINE_BY_ID)
                .bind(engine_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

            let deleted = sqlx::query("DELETE FROM engine WHERE id = $1")
                .bind(engine_id)
                .execute(&mut *tx)
                .await?;

            // Removed by a concurrent request between the read and the delete.
            if deleted.rows_affected() == 0 {
                return Err(StoreError::not_found(ENTITY, id));
            }
            Ok::<_, StoreError>(engine)
        }
        .await;

        let engine = finish_transaction(tx, result, "delete_engine").await?;
        tracing::info!("{} Deleted engine: {}", API_NAME, engine.id);
        Ok(engine)
    }
}
