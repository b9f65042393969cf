use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(get_cars_by_brand).post(create_car))
        .route(
            "/cars/:id",
            get(get_car_by_id).put(update_car).delete(delete_car),
        )
}

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    #[serde(default)]
    pub brand: String,
    /// Join full engine rows into the result.
    #[serde(default)]
    pub engine: bool,
}

async fn get_car_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let car = state.cars.get_car_by_id(&id).await?;
    Ok(Json(car))
}

async fn get_cars_by_brand(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<Vec<Car>>, AppError> {
    let cars = state
        .cars
        .get_cars_by_brand(&query.brand, query.engine)
        .await?;
    tracing::info!("{} Found {} cars for brand '{}'", API_NAME, cars.len(), query.brand);
    Ok(Json(cars))
}

async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let Json(request) = payload?;
    let car = state.cars.create_car(&request).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<Car>, AppError> {
    let Json(request) = payload?;
    let car = state.cars.update_car(&id, &request).await?;
    Ok(Json(car))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let car = state.cars.delete_car(&id).await?;
    Ok(Json(car))
}
