//! Login endpoint and bearer-token middleware

use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::handlers::AppState;
use crate::config::AuthConfig;
use crate::core::auth::{AuthContext, Claims, bearer_token, issue_token, verify_token};
use crate::core::error::{Operation, RequestError, StorageError, ValidationError};
use crate::core::{Filter, ShopError};
use crate::entities::User;

/// Request body for `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /login`
///
/// Looks up the live user by exact username and compares the stored
/// password verbatim.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ShopError> {
    let Json(request) = body.map_err(|rejection| ValidationError::InvalidJson {
        message: rejection.body_text(),
    })?;

    let matches = state
        .stores
        .users
        .search(&[Filter::exact("username", request.username.as_str())])
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "user lookup failed during login");
            StorageError::failed::<User>(Operation::Retrieve, e)
        })?;

    let Some(user) = matches
        .into_iter()
        .find(|user| user.password == request.password)
    else {
        warn!(username = %request.username, "login rejected");
        return Err(RequestError::InvalidCredentials.into());
    };

    let token = issue_token(&state.config.auth, user.id, &user.username, &user.role)
        .map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            RequestError::TokenIssuance {
                message: e.to_string(),
            }
        })?;

    Ok(Json(LoginResponse { token }))
}

/// Require a valid `Authorization: Bearer <token>` header
///
/// Passes every request through untouched when auth is disabled. On success
/// the verified [`AuthContext`] is attached as a request extension.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ShopError> {
    if !state.config.auth.enabled {
        request.extensions_mut().insert(AuthContext::Anonymous);
        return Ok(next.run(request).await);
    }

    let claims = authorize(&state.config.auth, request.headers())?;

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}

/// Verify the bearer token carried by `headers`
///
/// Every rejection is logged at warn level.
fn authorize(config: &AuthConfig, headers: &HeaderMap) -> Result<Claims, RequestError> {
    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
    else {
        warn!(
            present = headers.contains_key(AUTHORIZATION),
            "bearer token missing"
        );
        return Err(RequestError::Unauthorized);
    };

    verify_token(config, token).map_err(|e| {
        warn!(error = %e, "bearer token rejected");
        RequestError::Unauthorized
    })
}
