pub mod car_service;
pub mod engine_service;


pub use car_service::CarService;
pub use engine_service::EngineService;

use thiserror::Error;

use crate::models::ValidationError;
use crate::repository::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
