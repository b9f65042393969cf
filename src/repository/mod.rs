//! Persistence for engines and cars.
//!
//! Services depend on the [`EngineStore`] and [`CarStore`] traits and receive
//! an implementation at construction: the PostgreSQL repositories in
//! production, the in-memory stores in tests.

pub mod car_repo;
pub mod engine_repo;
pub mod errors;
pub mod in_memory;

pub use car_repo::CarRepository;
pub use engine_repo::EngineRepository;
pub use errors::StoreError;
pub use in_memory::{InMemoryCarStore, InMemoryEngineStore};

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::constants::API_NAME;
use crate::models::{Car, CarRequest, Engine, EngineRequest};

#[async_trait]
pub trait EngineStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Engine, StoreError>;

    /// Persists a new engine under a freshly generated id. No duplicate check.
    async fn create(&self, request: &EngineRequest) -> Result<Engine, StoreError>;

    async fn update(&self, id: &str, request: &EngineRequest) -> Result<Engine, StoreError>;

    /// Removes the engine and returns the values it had before deletion.
    async fn delete(&self, id: &str) -> Result<Engine, StoreError>;
}

#[async_trait]
pub trait CarStore: Send + Sync {
    /// Returns the car with its engine row joined in.
    async fn get_by_id(&self, id: &str) -> Result<Car, StoreError>;

    /// Cars with exactly this brand. Without `include_engine` the embedded
    /// engine carries only its id.
    async fn get_by_brand(&self, brand: &str, include_engine: bool)
        -> Result<Vec<Car>, StoreError>;

    async fn create(&self, request: &CarRequest) -> Result<Car, StoreError>;

    async fn update(&self, id: &str, request: &CarRequest) -> Result<Car, StoreError>;

    async fn delete(&self, id: &str) -> Result<Car, StoreError>;
}

pub(crate) fn parse_id(entity: &'static str, id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|source| StoreError::InvalidId {
        entity,
        id: id.to_string(),
        source,
    })
}

/// Commits on success, rolls back on error.
///
/// A failed commit is returned as [`StoreError::Commit`]. A failed rollback is
/// only logged so the caller still sees the error that caused it.
pub(crate) async fn finish_transaction<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, StoreError>,
    operation: &str,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                tracing::error!("{} Error committing transaction for {}: {}", API_NAME, operation, e);
                StoreError::Commit(e)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    "{} Error rolling back transaction for {}: {}",
                    API_NAME,
                    operation,
                    rollback_err
                );
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("engine", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("car", "not-a-uuid").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { entity: "car", .. }));
        assert!(err.to_string().starts_with("invalid car id 'not-a-uuid'"));
    }
}
