pub mod app;
pub mod session;

pub use app::{AppConfig, ConfigError, RunMode, HOSTING_MARKERS};
pub use session::{validate_production_config, SessionConfig, SessionLayer};
