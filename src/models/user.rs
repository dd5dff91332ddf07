use serde::{Deserialize, Serialize};

/// User record without the password hash. The hash only travels through
/// the dedicated credentials lookup in the user repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub created_at: String,
}
