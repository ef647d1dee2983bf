use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::posts::{Category, CreatePostDto, NewPost, Post, PostCard, PostDetail},
    repositories::posts_repo::PostsRepository,
    Error, Result,
};

pub const WORDS_PER_MINUTE: usize = 200;
pub const RELATED_POSTS_LIMIT: usize = 3;

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.get_posts().await
    }

    pub async fn get_post_cards(&self) -> Result<Vec<PostCard>> {
        let posts = self.repo.get_posts().await?;
        Ok(PostCard::from_posts(&posts))
    }

    #[instrument(skip(self, new_post))]
    pub async fn create_post(&self, new_post: CreatePostDto) -> Result<Post> {
        let client_read_time = new_post.read_time.clone();
        let submission = new_post.into_submission()?;
        submission.validate()?;

        let category: Category = submission.category.parse()?;
        let read_time = calculate_read_time(&submission.content);

        if let Some(client) = client_read_time.filter(|c| *c != read_time) {
            debug!(client = %client, server = %read_time, "Client read time differs, using server value");
        }

        let post = self
            .repo
            .create_post(NewPost {
                title: submission.title,
                excerpt: submission.excerpt,
                content: submission.content,
                image: submission.image,
                category,
                tags: submission.tags,
                read_time,
            })
            .await?;

        info!(post_id = %post.id, category = %post.category, "Post created");
        Ok(post)
    }

    /// An id that does not parse cannot match any record and is `NotFound`.
    pub async fn get_post_detail(&self, post_id: &str) -> Result<PostDetail> {
        let post_id = Uuid::parse_str(post_id).map_err(|_| Error::NotFound)?;
        let posts = self.repo.get_posts().await?;

        let post = find_post(&posts, post_id)?;
        let related = PostCard::from_posts(&related_posts(&post, &posts, RELATED_POSTS_LIMIT));

        Ok(PostDetail { post, related })
    }
}

/// Linear scan over the whole collection; there is no index by id.
pub fn find_post(posts: &[Post], post_id: Uuid) -> Result<Post> {
    posts
        .iter()
        .find(|p| p.id == post_id)
        .cloned()
        .ok_or(Error::NotFound)
}

/// `"{minutes} min read"` with `minutes = ceil(words / 200)`.
pub fn calculate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    format!("{minutes} min read")
}

/// Posts sharing `current`'s category, excluding `current`, in list order.
pub fn related_posts(current: &Post, all: &[Post], limit: usize) -> Vec<Post> {
    all.iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(limit)
        .cloned()
        .collect()
}
