use std::{path::Path, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{info, warn};

use crate::models::Role;
use crate::repositories::{
    user_repository::RepositoryError, NewUser, SqliteUserRepository, UserRepository,
};
use crate::services::password::hash_password;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/database.db";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@church.com";

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Could not seed admin user: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = database_file(database_url).and_then(|path| path.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

fn database_file(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(Path::new(path))
    }
}

/// Bring the schema up to date, insert the sample content once and make
/// sure the admin account exists. Safe to run on every start.
///
/// Returns `true` when the admin account was created by this call.
pub async fn initialize(pool: &SqlitePool, admin_password: &str) -> Result<bool, InitError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    let users = SqliteUserRepository::new(pool.clone());
    if users.find_by_username(DEFAULT_ADMIN_USERNAME).await?.is_some() {
        return Ok(false);
    }

    if admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("Seeding admin account with the default password; set ADMIN_PASSWORD");
    }

    let password_hash =
        hash_password(admin_password).map_err(|e| InitError::Hashing(e.to_string()))?;

    let admin = NewUser {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        password_hash,
        email: Some(DEFAULT_ADMIN_EMAIL.to_string()),
        role: Role::Admin,
    };

    match users.create_user(admin).await {
        Ok(user) => {
            info!("Created admin user {}", user.id);
            Ok(true)
        }
        // Another process seeded it between the lookup and the insert
        Err(RepositoryError::AlreadyExists) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_file_strips_scheme_and_query() {
        assert_eq!(
            database_file("sqlite://database/database.db"),
            Some(Path::new("database/database.db"))
        );
        assert_eq!(
            database_file("sqlite:data.db?mode=rwc"),
            Some(Path::new("data.db"))
        );
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file(":memory:"), None);
    }
}
