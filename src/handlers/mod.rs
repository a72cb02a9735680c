pub mod branch_handlers;
pub mod content_handlers;
pub mod dashboard_handlers;
pub mod event_handlers;
pub mod inspiration_handlers;
pub mod page;
pub mod public_handlers;
pub mod sermon_handlers;

pub use content_handlers::{
    add_page, add_submit, delete_handler, edit_page, edit_submit, list_page, ManagedContent,
};
pub use dashboard_handlers::dashboard_handler;
pub use page::PageContext;
pub use public_handlers::{
    branches_handler, events_handler, index_handler, inspiration_handler, sermons_handler,
};
