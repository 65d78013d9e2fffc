use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use murmur_types::api::{NewMessage, UpdateMessageRequest};
use murmur_types::models::Message;

use crate::error::ApiError;
use crate::run_blocking;
use crate::state::AppState;

pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<NewMessage>,
) -> Result<Json<Message>, ApiError> {
    let message = run_blocking(move || state.messages.create_message(&req)).await?;
    Ok(Json(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = run_blocking(move || state.messages.list_all_messages()).await?;
    Ok(Json(messages))
}

/// GET /messages/{message_id}. An unknown id is 200 with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = run_blocking(move || state.messages.get_message(message_id)).await?;
    Ok(ok_or_empty(message))
}

/// DELETE /messages/{message_id}. The body is the rows-affected count, or
/// empty when there was nothing to delete.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let removed = run_blocking(move || state.messages.delete_message(message_id)).await?;
    Ok(ok_or_empty(removed))
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<usize>, ApiError> {
    let changed =
        run_blocking(move || state.messages.update_message(message_id, &req.message_text)).await?;
    Ok(Json(changed))
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages =
        run_blocking(move || state.messages.list_messages_by_account(account_id)).await?;
    Ok(Json(messages))
}

fn ok_or_empty<T: serde::Serialize>(value: Option<T>) -> Response {
    match value {
        Some(v) => Json(v).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
