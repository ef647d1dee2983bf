use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{Error, Result};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "post_category")]
pub enum Category {
    Technology,
    Design,
    Business,
    Lifestyle,
    Travel,
    Food,
    Health,
    Education,
    Entertainment,
    Other,
}

impl Category {
    /// Display order used by the submission form.
    pub const ALL: [Category; 10] = [
        Self::Technology,
        Self::Design,
        Self::Business,
        Self::Lifestyle,
        Self::Travel,
        Self::Food,
        Self::Health,
        Self::Education,
        Self::Entertainment,
        Self::Other,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Design => "Design",
            Self::Business => "Business",
            Self::Lifestyle => "Lifestyle",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_str() == s)
            .ok_or_else(|| Error::BadRequest(format!("Unknown category: {s}")))
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub category: Category,
    pub tags: Vec<String>,
    #[serde(rename = "readTime")]
    pub read_time: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Short form of a post rendered in list views.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostCard {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub category: Category,
    pub tags: Vec<String>,
    #[serde(rename = "readTime")]
    pub read_time: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl PostCard {
    pub fn from_post(post: &Post) -> Self {
        PostCard {
            id: post.id,
            title: post.title.to_owned(),
            excerpt: post.excerpt.to_owned(),
            image: post.image.to_owned(),
            category: post.category,
            tags: post.tags.clone(),
            read_time: post.read_time.to_owned(),
            created_at: post.created_at,
        }
    }

    pub fn from_posts(posts: &[Post]) -> Vec<PostCard> {
        posts.iter().map(PostCard::from_post).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub related: Vec<PostCard>,
}

/// Raw request body. Every field is optional so that absence is reported
/// as a missing field rather than a deserialization failure.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CreatePostDto {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "readTime")]
    pub read_time: Option<String>,
}

impl CreatePostDto {
    /// Presence check: every required field must be present and non-blank.
    pub fn into_submission(self) -> Result<PostSubmission> {
        let tags: Vec<String> = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let (Some(title), Some(excerpt), Some(content), Some(image), Some(category)) = (
            present(self.title),
            present(self.excerpt),
            present(self.content),
            present(self.image),
            present(self.category),
        ) else {
            return Err(Error::MissingFields);
        };

        if tags.is_empty() {
            return Err(Error::MissingFields);
        }

        Ok(PostSubmission {
            title: title.trim().to_string(),
            excerpt: excerpt.trim().to_string(),
            content,
            image: image.trim().to_string(),
            category: category.trim().to_string(),
            tags,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Validate, Debug, Clone)]
pub struct PostSubmission {
    #[validate(length(
        min = 10,
        max = 200,
        message = "Title must be between 10 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 50,
        max = 300,
        message = "Excerpt must be between 50 and 300 characters"
    ))]
    pub excerpt: String,
    #[validate(length(min = 200, message = "Content must be at least 200 characters"))]
    pub content: String,
    #[validate(url(message = "Please enter a valid image URL"))]
    pub image: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(length(min = 1, max = 5, message = "Add between 1 and 5 tags"))]
    pub tags: Vec<String>,
}

fn validate_category(category: &str) -> std::result::Result<(), ValidationError> {
    if Category::ALL.iter().any(|c| c.to_str() == category) {
        return Ok(());
    }

    let mut err = ValidationError::new("category");
    err.message = Some("Please select a valid category".into());
    Err(err)
}

/// A submission that passed validation, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub read_time: String,
}
