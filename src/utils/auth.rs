// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{config::Config, error::AppError};

/// Extracts the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    value.strip_prefix("Bearer ").map(str::trim)
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Axum Middleware: Admin Authorization.
///
/// Validates the 'Authorization: Bearer <token>' header against `ADMIN_TOKEN`.
/// Returns 403 when no admin token is configured and 401 when the header is
/// missing or carries the wrong token.
pub async fn admin_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = config.admin_token.as_deref() else {
        return Err(AppError::Forbidden(
            "Admin API is disabled on this server".to_string(),
        ));
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    if !tokens_match(token, expected) {
        tracing::warn!("Rejected admin request with an invalid token");
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    }

    Ok(next.run(req).await)
}
