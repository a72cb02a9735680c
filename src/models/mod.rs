pub mod branch;
pub mod content;
pub mod event;
pub mod inspiration;
pub mod sermon;
pub mod user;

pub use branch::{Branch, BranchFields, BranchForm};
pub use content::{ContentFields, ContentRecord, Direction, FieldValue, ListOrder};
pub use event::{Event, EventFields, EventForm};
pub use inspiration::{Inspiration, InspirationFields, InspirationForm};
pub use sermon::{Sermon, SermonFields, SermonForm};
pub use user::{Role, User};
