use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    models::posts::{NewPost, Post},
    Result,
};

use super::PostgresRepo;

const POST_COLUMNS: &str =
    "id, title, excerpt, content, image, category, tags, read_time, created_at, updated_at";

#[async_trait]
pub trait PostsRepository: Sync + Send {
    /// Every stored post, in insertion order.
    async fn get_posts(&self) -> Result<Vec<Post>>;
    /// Appends one record; the store assigns id and timestamps.
    async fn create_post(&self, post: NewPost) -> Result<Post>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at, id");

        let posts = sqlx::query_as::<_, Post>(&sql)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    #[instrument(skip(self, post), fields(title = %post.title))]
    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let id = Uuid::now_v7();
        let sql = format!(
            r#"
            INSERT INTO posts (id, title, excerpt, content, image, category, tags, read_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {POST_COLUMNS}
            "#
        );

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(post.title)
            .bind(post.excerpt)
            .bind(post.content)
            .bind(post.image)
            .bind(post.category)
            .bind(post.tags)
            .bind(post.read_time)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }
}
