use std::sync::Arc;

use super::ServiceError;
use crate::constants::API_NAME;
use crate::models::{validate_engine_request, Engine, EngineRequest};
use crate::repository::EngineStore;

/// Validates mutating requests before they reach the store; reads and
/// deletes go straight through.
#[derive(Clone)]
pub struct EngineService {
    store: Arc<dyn EngineStore>,
}

impl EngineService {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "engine_service.get_by_id", skip(self))]
    pub async fn get_engine_by_id(&self, id: &str) -> Result<Engine, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    #[tracing::instrument(name = "engine_service.create", skip(self))]
    pub async fn create_engine(&self, request: &EngineRequest) -> Result<Engine, ServiceError> {
        if let Err(e) = validate_engine_request(request) {
            tracing::warn!("{} Rejected engine create request: {}", API_NAME, e);
            return Err(e.into());
        }

        tracing::info!("{} Creating engine", API_NAME);
        Ok(self.store.create(request).await?)
    }

    #[tracing::instrument(name = "engine_service.update", skip(self))]
    pub async fn update_engine(
        &self,
        id: &str,
        request: &EngineRequest,
    ) -> Result<Engine, ServiceError> {
        if let Err(e) = validate_engine_request(request) {
            tracing::warn!("{} Rejected engine update request for {}: {}", API_NAME, id, e);
            return Err(e.into());
        }

        tracing::info!("{} Updating engine: {}", API_NAME, id);
        Ok(self.store.update(id, request).await?)
    }

    #[tracing::instrument(name = "engine_service.delete", skip(self))]
    pub async fn delete_engine(&self, id: &str) -> Result<Engine, ServiceError> {
        tracing::info!("{} Deleting engine: {}", API_NAME, id);
        Ok(self.store.delete(id).await?)
    }
}
