use std::sync::Arc;

use tracing::instrument;

use crate::{
    models::users::{CreateUserDto, User},
    repositories::user_repo::UserRepository,
    Result,
};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, new_user))]
    pub async fn create_user(&self, new_user: CreateUserDto) -> Result<User> {
        self.repo
            .create_user(new_user.name.as_deref(), &new_user.email)
            .await
    }
}
