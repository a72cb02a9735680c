use crate::auth::identity::SessionIdentity;
use crate::models::user::User;
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::password::{hash_password, verify_password, PasswordCheck};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl From<AuthServiceError> for crate::error::AppError {
    fn from(err: AuthServiceError) -> Self {
        use crate::error::AppError;
        match err {
            AuthServiceError::InvalidCredentials => AppError::InvalidCredentials,
            AuthServiceError::RepositoryError(RepositoryError::Database(e)) => {
                AppError::Database(e)
            }
            AuthServiceError::RepositoryError(_) => AppError::InternalError,
        }
    }
}

pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Check credentials and return the identity to store in the session.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionIdentity, AuthServiceError> {
        let user = self.authenticate(request).await?;
        Ok(SessionIdentity::from(&user))
    }

    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AuthServiceError> {
        // Unknown usernames and wrong passwords are indistinguishable to the caller
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        match verify_password(&request.password, &user.password_hash) {
            PasswordCheck::Valid => Ok(user),
            PasswordCheck::ValidLegacy => {
                self.upgrade_legacy_hash(&user, &request.password).await;
                Ok(user)
            }
            PasswordCheck::Invalid => Err(AuthServiceError::InvalidCredentials),
        }
    }

    // Failure here must not block a login that already succeeded.
    async fn upgrade_legacy_hash(&self, user: &User, password: &str) {
        let new_hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Could not rehash legacy password for {}: {}", user.username, e);
                return;
            }
        };

        match self.user_repository.update_password(user.id, &new_hash).await {
            Ok(()) => info!("Upgraded legacy password hash for {}", user.username),
            Err(e) => warn!(
                "Could not store upgraded password hash for {}: {}",
                user.username, e
            ),
        }
    }
}
