//! Account settings handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::auth::AppState;
use crate::web::dto::{
    AcceptanceRequest, AcceptanceResponse, ApiResponse, AvailabilityResponse, UsernameCheckQuery,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/account/acceptance - Get the caller's acceptance gate.
pub async fn get_acceptance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AcceptanceResponse>>, ApiError> {
    let accepting = state.service.get_accepting(&auth.caller()).await?;

    Ok(Json(ApiResponse::new(AcceptanceResponse {
        is_accepting_messages: accepting,
    })))
}

/// POST /api/account/acceptance - Open or close the caller's inbox.
pub async fn set_acceptance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<AcceptanceRequest>,
) -> Result<Json<ApiResponse<AcceptanceResponse>>, ApiError> {
    let account = state
        .service
        .set_accepting(&auth.caller(), req.accepting)
        .await?;

    Ok(Json(ApiResponse::new(AcceptanceResponse {
        is_accepting_messages: account.is_accepting_messages,
    })))
}

/// GET /api/username-check - Check whether a username can still be claimed.
///
/// Available means no verified account holds the name. Unverified
/// registrations do not reserve it.
pub async fn username_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameCheckQuery>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    let available = state.service.is_username_available(&query.username).await?;

    Ok(Json(ApiResponse::new(AvailabilityResponse { available })))
}
