use axum::{Json, extract::State};

use murmur_types::api::Credentials;
use murmur_types::models::Account;

use crate::error::ApiError;
use crate::run_blocking;
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, ApiError> {
    let account = run_blocking(move || state.accounts.register(&req)).await?;
    Ok(Json(account))
}

/// POST /login. No token is issued; the account itself is the response.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, ApiError> {
    let account = run_blocking(move || state.accounts.login(&req)).await?;
    Ok(Json(account))
}
