use std::sync::Arc;

use super::ServiceError;
use crate::constants::API_NAME;
use crate::models::{validate_car_request, Car, CarRequest};
use crate::repository::CarStore;

#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "car_service.get_by_id", skip(self))]
    pub async fn get_car_by_id(&self, id: &str) -> Result<Car, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    #[tracing::instrument(name = "car_service.get_by_brand", skip(self))]
    pub async fn get_cars_by_brand(
        &self,
        brand: &str,
        include_engine: bool,
    ) -> Result<Vec<Car>, ServiceError> {
        Ok(self.store.get_by_brand(brand, include_engine).await?)
    }

    /// The embedded engine is checked structurally only; whether it exists is
    /// left to the store.
    #[tracing::instrument(name = "car_service.create", skip(self))]
    pub async fn create_car(&self, request: &CarRequest) -> Result<Car, ServiceError> {
        if let Err(e) = validate_car_request(request) {
            tracing::warn!("{} Rejected car create request: {}", API_NAME, e);
            return Err(e.into());
        }

        tracing::info!("{} Creating car: {} {}", API_NAME, request.brand, request.name);
        Ok(self.store.create(request).await?)
    }

    #[tracing::instrument(name = "car_service.update", skip(self))]
    pub async fn update_car(&self, id: &str, request: &CarRequest) -> Result<Car, ServiceError> {
        if let Err(e) = validate_car_request(request) {
            tracing::warn!("{} Rejected car update request for {}: {}", API_NAME, id, e);
            return Err(e.into());
        }

        tracing::info!("{} Updating car: {}", API_NAME, id);
        Ok(self.store.update(id, request).await?)
    }

    #[tracing::instrument(name = "car_service.delete", skip(self))]
    pub async fn delete_car(&self, id: &str) -> Result<Car, ServiceError> {
        tracing::info!("{} Deleting car: {}", API_NAME, id);
        Ok(self.store.delete(id).await?)
    }
}
