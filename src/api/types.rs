use serde::{Deserialize, Serialize};

use crate::models::blog::Blog;
use crate::models::user::User;

/// Error body shape shared by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Partial user projection attached to listed blogs. Never carries the
/// password hash.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerDto {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
}

impl From<User> for OwnerDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// Blog with its owner expanded, as returned by the list endpoint
#[derive(Debug, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<OwnerDto>,
}

/// Blog with the owner left as a raw reference, as returned by create
/// and update
#[derive(Debug, Serialize)]
pub struct BlogRowDto {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<i32>,
}

impl From<Blog> for BlogRowDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user_id,
        }
    }
}

/// Blog projection nested under a user in the users listing
#[derive(Debug, Serialize)]
pub struct UserBlogDto {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl From<Blog> for UserBlogDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<UserBlogDto>,
}

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub id: i32,
    pub token: String,
}
