use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use credentials::Role;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .credential_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|id| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData { id: id.to_string() },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    role: String,
}

/// Validation failure listing every offending field.
#[derive(Debug, Clone)]
struct ParseRegisterRequestError {
    fields: Vec<FieldError>,
}

#[derive(Debug, Clone)]
struct FieldError {
    field: &'static str,
    message: String,
}

impl fmt::Display for ParseRegisterRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid field(s): ")?;
        for (i, e) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl RegisterRequest {
    /// Validate all fields at once so the response names every violation,
    /// not just the first.
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let mut fields = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| {
                fields.push(FieldError {
                    field: "username",
                    message: e.to_string(),
                })
            })
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| {
                fields.push(FieldError {
                    field: "email",
                    message: e.to_string(),
                })
            })
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| {
                fields.push(FieldError {
                    field: "password",
                    message: e.to_string(),
                })
            })
            .ok();
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| {
                fields.push(FieldError {
                    field: "role",
                    message: e.to_string(),
                })
            })
            .ok();

        match (username, email, password, role) {
            (Some(username), Some(email), Some(password), Some(role)) => {
                Ok(RegisterUserCommand::new(username, email, password, role))
            }
            _ => Err(ParseRegisterRequestError { fields }),
        }
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
}
