use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A required form field was absent or a value was malformed.
    #[error("{0}")]
    Validation(String),

    /// Unknown id on get/edit. Carries the entity label, e.g. "Sermon".
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin access required")]
    AdminAccessRequired,

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Internal server error")]
    InternalError,
}

impl AppError {
    pub fn missing_field(field: &str) -> Self {
        AppError::Validation(format!("Missing required field: {}", field))
    }

    /// True for the errors that are reported back to the user as a flash
    /// notice instead of an error page.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::NotFound(_)
                | AppError::InvalidCredentials
                | AppError::AdminAccessRequired
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AppError::AdminAccessRequired => {
                (StatusCode::FORBIDDEN, "Admin access required".to_string())
            }
            AppError::NotFound(label) => (StatusCode::NOT_FOUND, format!("{} not found", label)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(_) | AppError::Session(_) | AppError::InternalError => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, error_message).into_response()
    }
}
