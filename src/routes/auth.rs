use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::routes::validation::JsonBody;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    #[serde(rename = "appName")]
    pub app_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub token: String,
}

fn missing_credential(field: &str) -> AppError {
    AppError::Validation(format!(
        "Expected format of {{ email: <string>, appName: <string> }}. You are missing a {} property",
        field
    ))
}

/// Issue a bearer token
///
/// The token carries the admin claim when the email belongs to the configured
/// admin domain. Returns 422 if either `email` or `appName` is missing.
///
/// POST /api/v1/authenticate
pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AuthenticateRequest>,
) -> Result<(StatusCode, Json<AuthenticateResponse>)> {
    let email = match payload.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(missing_credential("email")),
    };
    let app_name = match payload.app_name {
        Some(app_name) if !app_name.trim().is_empty() => app_name,
        _ => return Err(missing_credential("appName")),
    };

    let claims = state.tokens.claims_for(&email, &app_name);
    let token = state.tokens.sign(&claims)?;

    tracing::info!(
        "Issued token for app {} (admin: {})",
        claims.app_name,
        claims.admin
    );

    Ok((StatusCode::CREATED, Json(AuthenticateResponse { token })))
}
