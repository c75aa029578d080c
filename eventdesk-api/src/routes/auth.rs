/// Authentication endpoints
///
/// - `POST /api/auth/register`: create an inactive account and mail its
///   activation code
/// - `POST /api/auth/login`: exchange `{identifier, password}` for a token
/// - `POST /api/auth/activation`: redeem `{code}`
/// - `GET /api/auth/me`: profile of the bearer
///
/// Bodies are passed through as JSON values; the auth pipeline validates
/// them against its schemas.

use axum::{extract::State, Extension, Json};
use eventdesk_shared::{auth::jwt::UserToken, models::user::User};
use serde_json::Value;

use crate::{
    app::AppState,
    error::ApiResult,
    response::{success, AppJson, Envelope},
};

/// Register a new user
///
/// # Request
///
/// ```json
/// {
///   "fullName": "Alice Liddell",
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "Abc123",
///   "confirmPassword": "Abc123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email or username taken
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.auth.register(&payload).await?;
    Ok(success("success registration", user))
}

/// Log in with email or username
///
/// `data` is the signed token.
///
/// # Errors
///
/// - `404 Not Found`: unknown identifier
/// - `403 Forbidden`: inactive account or wrong password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<String>>> {
    let token = state.auth.login(&payload).await?;
    Ok(success("login success", token))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<UserToken>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.auth.me(&user).await?;
    Ok(success("success get user profile", user))
}

/// Redeem an activation code
///
/// # Errors
///
/// - `404 Not Found`: unknown or already redeemed code
pub async fn activation(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.auth.activate(&payload).await?;
    Ok(success("user successfully activated", user))
}
