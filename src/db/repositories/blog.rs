use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};
use tracing::info;

use crate::entities::blogs;
use crate::models::blog::{Blog, BlogPatch};

impl From<blogs::Model> for Blog {
    fn from(model: blogs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            url: model.url,
            likes: model.likes,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        title: &str,
        author: Option<&str>,
        url: &str,
        likes: i64,
        user_id: Option<i32>,
    ) -> Result<Blog> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = blogs::ActiveModel {
            title: Set(title.to_string()),
            author: Set(author.map(ToString::to_string)),
            url: Set(url.to_string()),
            likes: Set(likes),
            user_id: Set(user_id),
            created_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert blog")?;

        info!("Added blog {}: {}", model.id, model.title);
        Ok(Blog::from(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Blog>> {
        let blog = blogs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog by ID")?;

        Ok(blog.map(Blog::from))
    }

    pub async fn list_all(&self) -> Result<Vec<Blog>> {
        let rows = blogs::Entity::find()
            .order_by_asc(blogs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list blogs")?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Blog>> {
        let rows = blogs::Entity::find()
            .filter(blogs::Column::UserId.eq(user_id))
            .order_by_asc(blogs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list blogs for user")?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    /// Apply a partial update. Returns the updated blog, or `None` if
    /// the id does not resolve to an existing record.
    pub async fn update(&self, id: i32, patch: &BlogPatch) -> Result<Option<Blog>> {
        let Some(existing) = blogs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog for update")?
        else {
            return Ok(None);
        };

        let mut active: blogs::ActiveModel = existing.into();

        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(author) = &patch.author {
            active.author = Set(Some(author.clone()));
        }
        if let Some(url) = &patch.url {
            active.url = Set(url.clone());
        }
        if let Some(likes) = patch.likes {
            active.likes = Set(likes);
        }

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update blog")?;

        Ok(Some(Blog::from(model)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = blogs::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected > 0)
    }
}
