pub mod handlers;
pub mod identity;
pub mod middleware;

pub use identity::{SessionIdentity, IDENTITY_KEY};
pub use middleware::require_admin;
