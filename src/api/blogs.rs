use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::auth::{Identity, require_identity};
use super::{ApiError, AppState, BlogDto, BlogRowDto, NewBlogRequest, OwnerDto, validation};
use crate::models::blog::BlogPatch;

/// GET /api/blogs
/// All blogs with the owner expanded to a partial user projection
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BlogDto>>, ApiError> {
    let blogs = state.store().list_blogs().await?;

    // Resolve each distinct owner once
    let mut owners: HashMap<i32, OwnerDto> = HashMap::new();
    for blog in &blogs {
        if let Some(user_id) = blog.user_id
            && !owners.contains_key(&user_id)
            && let Some(user) = state.store().get_user_by_id(user_id).await?
        {
            owners.insert(user_id, OwnerDto::from(user));
        }
    }

    let dtos = blogs
        .into_iter()
        .map(|blog| {
            let user = blog.user_id.and_then(|id| owners.get(&id).cloned());
            BlogDto {
                id: blog.id,
                title: blog.title,
                author: blog.author,
                url: blog.url,
                likes: blog.likes,
                user,
            }
        })
        .collect();

    Ok(Json(dtos))
}

/// POST /api/blogs
/// Authenticated creation; the new blog carries the caller's identity
/// as its owning-user reference
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    identity: Option<Extension<Identity>>,
    Json(payload): Json<NewBlogRequest>,
) -> Result<(StatusCode, Json<BlogRowDto>), ApiError> {
    let identity = require_identity(identity.map(|Extension(i)| i))?;

    validation::reject_if_invalid(validation::validate_new_blog(&payload))?;

    // The token may outlive its user
    let user = state
        .store()
        .get_user_by_id(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::validation("user for token no longer exists"))?;

    let blog = state
        .store()
        .create_blog(
            payload.title.as_deref().unwrap_or_default(),
            payload.author.as_deref(),
            payload.url.as_deref().unwrap_or_default(),
            payload.likes.unwrap_or(0),
            Some(user.id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(BlogRowDto::from(blog))))
}

/// PUT /api/blogs/:id
/// Partial update of mutable fields; deliberately not identity-gated
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<BlogPatch>,
) -> Result<Json<BlogRowDto>, ApiError> {
    let id = validation::parse_id(&id)?;

    let updated = state.store().update_blog(id, &patch).await?;

    match updated {
        Some(blog) => Ok(Json(BlogRowDto::from(blog))),
        None => Err(ApiError::not_found("no record to update")),
    }
}

/// DELETE /api/blogs/:id
/// Only the owning user may delete; a blog without an owner fails the
/// gate for every caller
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    identity: Option<Extension<Identity>>,
) -> Result<StatusCode, ApiError> {
    let identity = require_identity(identity.map(|Extension(i)| i))?;

    let id = validation::parse_id(&id)?;

    let blog = state
        .store()
        .get_blog(id)
        .await?
        .ok_or_else(ApiError::not_found_empty)?;

    if blog.user_id != Some(identity.user_id) {
        return Err(ApiError::Forbidden(
            "user must be the owner to delete a blog".to_string(),
        ));
    }

    state.store().remove_blog(id).await?;
    tracing::info!("User {} deleted blog {}", identity.username, id);

    Ok(StatusCode::NO_CONTENT)
}
