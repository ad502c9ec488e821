use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use credentials::Role;
use credentials::TokenError;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified identity through the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Access guard: verifies the bearer token and attaches the claims.
///
/// Every rejection is a 401; the distinct failure causes (missing header,
/// malformed header, invalid signature, expiry, malformed token) are only
/// told apart in the logs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_codec.verify(token, Utc::now()).map_err(|e| {
        match &e {
            TokenError::Expired => tracing::warn!("Token rejected: expired"),
            TokenError::InvalidSignature => tracing::warn!("Token rejected: invalid signature"),
            other => tracing::warn!(error = %other, "Token rejected"),
        }
        unauthorized("Invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user id");
        unauthorized("Invalid token")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Role gate: compares the attached role against the required one.
///
/// Runs after `authenticate`, so a missing extension means the route was
/// wired without the guard; that is rejected too rather than let through.
pub async fn require_role(required: Role, req: Request, next: Next) -> Result<Response, Response> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| unauthorized("Authentication required"))?;

    if user.role != required {
        tracing::info!(
            user_id = %user.user_id,
            required = %required,
            actual = %user.role,
            "Insufficient permissions"
        );
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Insufficient permissions"
            })),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Authorization header missing");
            unauthorized("Missing Authorization header")
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid UTF-8");
        unauthorized("Invalid Authorization header")
    })?;

    // Strip the prefix exactly once; a doubled "Bearer Bearer <token>" is
    // not of the required form and must fail verification downstream
    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Authorization header is not a bearer credential");
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}
