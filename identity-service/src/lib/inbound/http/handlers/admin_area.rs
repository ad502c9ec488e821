use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

/// Role-gated resource; the admin gate has already run by the time this
/// handler executes.
pub async fn admin_area() -> Result<ApiSuccess<AdminAreaResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        AdminAreaResponseData {
            message: "Admin access granted".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminAreaResponseData {
    pub message: String,
}
