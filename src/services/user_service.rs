use crate::models::user::{Role, User};
use crate::repositories::user_repository::{NewUser, RepositoryError, UserRepository};
use crate::services::password::hash_password;
use std::sync::Arc;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Username must be at least 3 characters long")]
    InvalidUsername,
    #[error("Password must be at least 6 characters long")]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("User not found")]
    UserNotFound,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

pub struct UpdatePasswordRequest {
    pub user_id: i64,
    pub new_password: String,
    pub new_password_confirm: Option<String>,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        let username = request.username.trim().to_string();
        self.validate_username(&username)?;

        if let Some(ref confirm) = request.password_confirm {
            if request.password != *confirm {
                return Err(UserServiceError::PasswordMismatch);
            }
        }

        self.validate_password(&request.password)?;

        let password_hash = self.hash_password(&request.password)?;

        let new_user = NewUser {
            username,
            password_hash,
            email: request.email.filter(|e| !e.trim().is_empty()),
            role: request.role,
        };

        match self.repository.create_user(new_user).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::UsernameTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_username(username).await?)
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users(limit, offset).await?)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        match self.repository.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn update_password(
        &self,
        request: UpdatePasswordRequest,
    ) -> Result<(), UserServiceError> {
        if let Some(ref confirm) = request.new_password_confirm {
            if request.new_password != *confirm {
                return Err(UserServiceError::PasswordMismatch);
            }
        }

        self.validate_password(&request.new_password)?;

        let password_hash = self.hash_password(&request.new_password)?;

        match self
            .repository
            .update_password(request.user_id, &password_hash)
            .await
        {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    fn validate_username(&self, username: &str) -> Result<(), UserServiceError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(UserServiceError::InvalidUsername);
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), UserServiceError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserServiceError::WeakPassword);
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, UserServiceError> {
        hash_password(password).map_err(|e| UserServiceError::HashingError(e.to_string()))
    }
}
