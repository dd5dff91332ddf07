use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{ApiError, AppState, NewUserRequest, UserBlogDto, UserDto, validation};
use crate::auth::password;

/// POST /api/users
/// Create a user; validation runs before hashing so bad requests stay
/// cheap
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    validation::reject_if_invalid(validation::validate_new_user(&payload))?;

    // Presence was just validated
    let username = payload.username.as_deref().unwrap_or_default();
    let plain = payload.password.as_deref().unwrap_or_default();

    let cost = state.config().read().await.security.bcrypt_cost;
    let password_hash = password::hash_blocking(plain, cost)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let user = state
        .store()
        .create_user(username, payload.name.as_deref(), &password_hash)
        .await?
        .ok_or_else(ApiError::duplicate_username)?;

    tracing::info!("Created user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(UserDto {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: vec![],
        }),
    ))
}

/// GET /api/users
/// All users with their owned blogs populated by query
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.store().list_users().await?;

    let mut dtos = Vec::with_capacity(users.len());
    for user in users {
        let blogs = state.store().list_blogs_for_user(user.id).await?;
        dtos.push(UserDto {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: blogs.into_iter().map(UserBlogDto::from).collect(),
        });
    }

    Ok(Json(dtos))
}
