//! Authentication handlers.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::service::{MailboxService, SignUpRequest};
use crate::web::dto::{
    AccountInfo, AccountResponse, ApiResponse, LoginRequest, LoginResponse, RegisterRequest,
    ValidatedJson, VerifyRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, JwtClaims};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Core mailbox service.
    pub service: MailboxService,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: MailboxService, jwt_secret: &str, access_expiry: u64) -> Self {
        Self {
            service,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
        }
    }

    /// Generate an access token for an account.
    pub fn generate_access_token(
        &self,
        account_id: i64,
        username: &str,
    ) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: account_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}

/// POST /api/auth/register - Sign up a new account.
///
/// The account starts unverified; a verification code goes out to the
/// given email address. No token is issued until the code is confirmed.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let request = SignUpRequest::new(req.username, req.email, req.password);
    let account = state.service.sign_up(&request).await?;

    Ok(Json(ApiResponse::new(AccountResponse::from_account(
        &account,
    ))))
}

/// POST /api/auth/verify - Confirm an account with its emailed code.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<VerifyRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.service.verify_account(&req.username, &req.code).await?;

    Ok(Json(ApiResponse::new(AccountResponse::from_account(
        &account,
    ))))
}

/// POST /api/auth/login - Log in with a username or email.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    // Validate input
    if req.identifier.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Identifier and password are required"));
    }

    let caller = state
        .service
        .authenticate(&req.identifier, &req.password)
        .await?;

    let access_token = state.generate_access_token(caller.account_id, &caller.username)?;

    let response = LoginResponse {
        access_token,
        expires_in: state.access_token_expiry,
        user: AccountInfo {
            id: caller.account_id,
            username: caller.username,
        },
    };

    Ok(Json(ApiResponse::new(response)))
}

/// GET /api/auth/me - Get the current account.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.service.get_account(&auth.caller()).await?;

    Ok(Json(ApiResponse::new(AccountResponse::from_account(
        &account,
    ))))
}
