use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState, LoginRequest, LoginResponse};
use crate::auth::{password, token};

/// Identity resolved from a bearer token, attached to the request for
/// the duration of a single request only.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Runs before every `/api` route. Attaches an [`Identity`] to the
/// request extensions when a valid `Authorization: Bearer <token>`
/// header is present; never rejects the request itself. Handlers that
/// need an identity check for it and fail with 401 themselves.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(bearer) = extract_bearer_token(&headers) {
        let secret = state.config().read().await.security.token_secret.clone();

        match token::verify(&bearer, &secret) {
            Ok(claims) => {
                tracing::Span::current().record("user_id", claims.id);
                request.extensions_mut().insert(Identity {
                    user_id: claims.id,
                    username: claims.username,
                });
            }
            Err(e) => {
                tracing::debug!("Ignoring bearer token: {e}");
            }
        }
    }

    next.run(request).await
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(bearer) = auth_str.strip_prefix("Bearer ")
    {
        return Some(bearer.trim().to_string());
    }

    None
}

/// Fail fast when a handler requires an attached identity
pub fn require_identity(identity: Option<Identity>) -> Result<Identity, ApiError> {
    identity.ok_or_else(|| ApiError::unauthorized("token missing or invalid"))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/login
/// Verify username/password and answer with a signed bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let record = state.store().get_user_with_password(&payload.username).await?;

    let Some((user, password_hash)) = record else {
        // Observed contract: unknown username is a 400, not a 401
        return Err(ApiError::validation("user not found"));
    };

    let is_valid = password::verify_blocking(&payload.password, &password_hash)
        .await
        .map_err(|e| ApiError::internal(format!("Password verification error: {e}")))?;

    if !is_valid {
        return Err(ApiError::unauthorized(
            "password and username don't match",
        ));
    }

    let (secret, ttl) = {
        let config = state.config().read().await;
        (
            config.security.token_secret.clone(),
            config.security.token_ttl_seconds,
        )
    };

    let signed = token::issue(&user.username, user.id, &secret, ttl)
        .map_err(|e| ApiError::internal(format!("Failed to sign token: {e}")))?;

    tracing::info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        username: user.username,
        id: user.id,
        token: signed,
    }))
}
