pub mod test_helpers {
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;

    use crate::models::Role;
    use crate::services::password::hash_password;

    /// Create a new in-memory SQLite database with the schema and sample
    /// content applied
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when a test needs several connections or reopens the file
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a user with an Argon2 hash of `password`
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = hash_password(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        let result =
            sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
                .bind(username)
                .bind(password_hash)
                .bind(role.as_str())
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a user whose stored hash is the unsalted SHA-256 hex digest
    /// older databases contain
    pub async fn insert_legacy_user(
        pool: &SqlitePool,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        use sha2::{Digest, Sha256};

        let digest = hex::encode(Sha256::digest(password.as_bytes()));
        let result =
            sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
                .bind(username)
                .bind(digest)
                .bind(role.as_str())
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }
}
