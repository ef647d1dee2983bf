use std::sync::Arc;

use mail::sendmail::MailTransport;
use repositories::{posts_repo::PostsRepository, user_repo::UserRepository};
use services::{contact::ContactService, posts::PostsService, users::UserService};

pub use self::errors::{Error, Result};

pub mod config;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts_service: PostsService,
    pub users_service: UserService,
    pub contact_service: ContactService,
}

impl AppState {
    pub fn new(
        config: Config,
        posts_repo: Arc<dyn PostsRepository>,
        users_repo: Arc<dyn UserRepository>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        let contact_service = ContactService::new(mailer, config.contact_recipient.clone());

        Self {
            config,
            posts_service: PostsService::new(posts_repo),
            users_service: UserService::new(users_repo),
            contact_service,
        }
    }
}
