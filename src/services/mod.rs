pub mod auth_service;
pub mod content_service;
pub mod dashboard_service;
pub mod home_service;
pub mod password;
pub mod user_service;

pub use auth_service::{AuthService, AuthServiceError, LoginRequest};
pub use content_service::ContentService;
pub use dashboard_service::{DashboardService, DashboardStats};
pub use home_service::{HomePage, HomeService};
pub use user_service::{UserService, UserServiceError};
