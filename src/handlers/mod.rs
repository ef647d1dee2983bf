pub mod contact;
pub mod posts;
pub mod user;
