//! Explicit field validation, run before anything touches the store.
//! Messages are part of the API contract and asserted by the
//! integration tests.

use super::ApiError;
use super::types::{NewBlogRequest, NewUserRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

pub fn validate_new_user(req: &NewUserRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match req.password.as_deref() {
        None => errors.push(FieldError::new(
            "password",
            "password is required to create the user",
        )),
        Some(p) if p.chars().count() < 3 => errors.push(FieldError::new(
            "password",
            "password must be at least 3 characters",
        )),
        Some(_) => {}
    }

    match req.username.as_deref() {
        None | Some("") => errors.push(FieldError::new(
            "username",
            "username is required to create the user",
        )),
        Some(u) if u.chars().count() < 3 => errors.push(FieldError::new(
            "username",
            "username minimum length is 3 characters",
        )),
        Some(_) => {}
    }

    errors
}

pub fn validate_new_blog(req: &NewBlogRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if req.title.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("title", "Title is a required value"));
    }

    if req.url.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::new("url", "Url is a required value"));
    }

    errors
}

/// Collapse field errors into a single 400, joining messages when more
/// than one field failed.
pub fn reject_if_invalid(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    Err(ApiError::validation(message))
}

/// Parse a path id. Anything that is not a positive integer is a
/// malformed id (400), distinct from a well-formed id that resolves to
/// nothing (404).
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::malformed_id(raw)),
    }
}
