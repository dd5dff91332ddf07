use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: i64,
    pub user_id: Option<i32>,
    pub created_at: String,
}

/// Partial update for a blog's mutable fields. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}
