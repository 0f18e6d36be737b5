//! Mailbox handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::auth::AppState;
use crate::web::dto::{
    sanitize_string, ApiResponse, DeleteResponse, MessageResponse, SendMessageRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /api/u/:username/messages - Send an anonymous message.
///
/// No authentication: anyone who knows the username can write to the
/// inbox, as long as it is accepting messages.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let content = sanitize_string(&req.content);
    let message = state.service.send_message(&username, &content).await?;

    Ok(Json(ApiResponse::new(MessageResponse::from_message(
        &message,
    ))))
}

/// GET /api/messages - List the caller's messages, newest first.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MessageResponse>>>, ApiError> {
    let messages = state.service.list_messages(&auth.caller()).await?;

    let responses: Vec<MessageResponse> =
        messages.iter().map(MessageResponse::from_message).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// DELETE /api/messages/:id - Delete one of the caller's messages.
///
/// Deleting a message that is already gone, or that belongs to someone
/// else, reports `deleted: false` rather than an error.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(message_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let deleted = state
        .service
        .delete_message(&auth.caller(), message_id)
        .await?;

    Ok(Json(ApiResponse::new(DeleteResponse { deleted })))
}
