//! Field rules for incoming car and engine requests.
//!
//! Rules run in a fixed order and stop at the first failure; the error names
//! the rule that failed.

use chrono::{Datelike, Utc};
use thiserror::Error;

use super::{CarRequest, Engine, EngineRequest, FuelType};

const MIN_YEAR: i32 = 1900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate_car_request(request: &CarRequest) -> Result<(), ValidationError> {
    validate_name(&request.name)?;
    validate_year(&request.year, Utc::now().year())?;
    validate_fuel_type(&request.fuel_type)?;
    validate_brand(&request.brand)?;
    validate_engine(&request.engine)?;
    validate_price(request.price)?;
    Ok(())
}

pub fn validate_engine_request(request: &EngineRequest) -> Result<(), ValidationError> {
    if request.displacement <= 0 {
        return Err(ValidationError::new(
            "engine displacement cannot be empty, 0 or less",
        ));
    }
    if request.no_of_cylinders <= 0 {
        return Err(ValidationError::new(
            "engine number of cylinders cannot be empty, 0 or less",
        ));
    }
    if request.car_range <= 0 {
        return Err(ValidationError::new(
            "engine car range cannot be empty, 0 or less",
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("name cannot be empty"));
    }
    Ok(())
}

fn validate_year(year: &str, current_year: i32) -> Result<(), ValidationError> {
    if year.is_empty() {
        return Err(ValidationError::new("year cannot be empty"));
    }
    // Digits only: `parse` accepts a leading sign.
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("year must be a number"));
    }
    let parsed: i32 = year
        .parse()
        .map_err(|_| ValidationError::new("year must be a number"))?;
    if year.len() != 4 || !(MIN_YEAR..=current_year).contains(&parsed) {
        return Err(ValidationError::new(
            "year must be between 1900 and current year",
        ));
    }
    Ok(())
}

fn validate_fuel_type(fuel_type: &str) -> Result<(), ValidationError> {
    fuel_type.parse::<FuelType>().map(|_| ()).map_err(|_| {
        let allowed: Vec<&str> = FuelType::ALL.iter().map(FuelType::as_str).collect();
        ValidationError::new(format!(
            "invalid fuel type selected, please select one of the following: {}",
            allowed.join(", ")
        ))
    })
}

fn validate_brand(brand: &str) -> Result<(), ValidationError> {
    if brand.is_empty() {
        return Err(ValidationError::new("brand cannot be empty"));
    }
    Ok(())
}

fn validate_engine(engine: &Engine) -> Result<(), ValidationError> {
    if engine.id.is_nil() {
        return Err(ValidationError::new("engine id cannot be empty"));
    }
    if engine.displacement <= 0 {
        return Err(ValidationError::new("engine displacement cannot be empty"));
    }
    if engine.no_of_cylinders <= 0 {
        return Err(ValidationError::new(
            "engine number of cylinders cannot be empty",
        ));
    }
    if engine.car_range <= 0 {
        return Err(ValidationError::new("engine car range cannot be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_nan() || price <= 0.0 {
        return Err(ValidationError::new("price must be greater than 0"));
    }
    Ok(())
}
