pub mod car;
pub mod credentials;
pub mod engine;
pub mod validation;

pub use car::{Car, CarRequest, FuelType};
pub use credentials::{Credentials, TokenResponse};
pub use engine::{Engine, EngineRequest};
pub use validation::{validate_car_request, validate_engine_request, ValidationError};
