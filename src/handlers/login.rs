use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};

use crate::auth::verify_credentials;
use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Credentials, TokenResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(credentials) = payload?;
    verify_credentials(&credentials)?;

    let token = state.jwt.generate_token(&credentials.username)?;
    tracing::info!("{} Issued token for {}", API_NAME, credentials.username);

    Ok(Json(TokenResponse { token }))
}
