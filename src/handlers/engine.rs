use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::error::AppError;
use crate::models::{Engine, EngineRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/engines", post(create_engine)).route(
        "/engines/:id",
        get(get_engine_by_id).put(update_engine).delete(delete_engine),
    )
}

async fn get_engine_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Engine>, AppError> {
    let engine = state.engines.get_engine_by_id(&id).await?;
    Ok(Json(engine))
}

async fn create_engine(
    State(state): State<AppState>,
    payload: Result<Json<EngineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Engine>), AppError> {
    let Json(request) = payload?;
    let engine = state.engines.create_engine(&request).await?;
    Ok((StatusCode::CREATED, Json(engine)))
}

async fn update_engine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EngineRequest>, JsonRejection>,
) -> Result<Json<Engine>, AppError> {
    let Json(request) = payload?;
    let engine = state.engines.update_engine(&id, &request).await?;
    Ok(Json(engine))
}

async fn delete_engine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Engine>, AppError> {
    let engine = state.engines.delete_engine(&id).await?;
    Ok(Json(engine))
}
