use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::blog::{Blog, BlogPatch};
use crate::models::user::User;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each pooled connection to :memory: would get its own database
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Returns `None` when the username is already taken.
    pub async fn create_user(
        &self,
        username: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<Option<User>> {
        self.user_repo().create(username, name, password_hash).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo()
            .get_by_username_with_password(username)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    // ========================================================================
    // Blogs
    // ========================================================================

    pub async fn create_blog(
        &self,
        title: &str,
        author: Option<&str>,
        url: &str,
        likes: i64,
        user_id: Option<i32>,
    ) -> Result<Blog> {
        self.blog_repo()
            .create(title, author, url, likes, user_id)
            .await
    }

    pub async fn get_blog(&self, id: i32) -> Result<Option<Blog>> {
        self.blog_repo().get(id).await
    }

    pub async fn list_blogs(&self) -> Result<Vec<Blog>> {
        self.blog_repo().list_all().await
    }

    pub async fn list_blogs_for_user(&self, user_id: i32) -> Result<Vec<Blog>> {
        self.blog_repo().list_for_user(user_id).await
    }

    pub async fn update_blog(&self, id: i32, patch: &BlogPatch) -> Result<Option<Blog>> {
        self.blog_repo().update(id, patch).await
    }

    pub async fn remove_blog(&self, id: i32) -> Result<bool> {
        self.blog_repo().remove(id).await
    }
}
