//! In-memory store used when no database is configured, and by the tests.
//!
//! Records keep insertion order. Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{
        posts::{NewPost, Post},
        users::User,
    },
    Result,
};

use super::{posts_repo::PostsRepository, user_repo::UserRepository};

#[derive(Default)]
pub struct InMemoryRepo {
    posts: RwLock<Vec<Post>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a record as-is, skipping the service layer. Used for seeding.
    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }
}

#[async_trait]
impl PostsRepository for InMemoryRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::now_v7(),
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            image: post.image,
            category: post.category,
            tags: post.tags,
            read_time: post.read_time,
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn create_user(&self, name: Option<&str>, email: &str) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: name.map(str::to_string),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posts::Category;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "content".to_string(),
            image: "https://example.com/a.png".to_string(),
            category: Category::Travel,
            tags: vec!["trip".to_string()],
            read_time: "1 min read".to_string(),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let repo = InMemoryRepo::new();
        for title in ["first", "second", "third"] {
            repo.create_post(new_post(title)).await.unwrap();
        }

        let titles: Vec<_> = repo
            .get_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn identical_posts_get_distinct_ids() {
        let repo = InMemoryRepo::new();
        let a = repo.create_post(new_post("same")).await.unwrap();
        let b = repo.create_post(new_post("same")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(repo.get_posts().await.unwrap().len(), 2);
    }
}
