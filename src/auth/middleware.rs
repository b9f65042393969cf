use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::{AuthError, JwtManager};
use crate::constants::API_NAME;
use crate::error::AppError;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
/// The decoded [`Claims`](super::Claims) are attached to the request.
pub async fn require_bearer_token(
    State(jwt): State<JwtManager>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt.validate_token(token.trim()).map_err(|e| {
        tracing::warn!("{} Rejected bearer token: {}", API_NAME, e);
        e
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
