pub mod content_repository;
pub mod user_repository;

pub use content_repository::{ContentRepository, SqliteContentRepository};
pub use user_repository::{NewUser, SqliteUserRepository, UserRepository};
