use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the verified identity attached by the access guard.
pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: user.user_id.to_string(),
            role: user.role.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user_id: String,
    pub role: String,
}
