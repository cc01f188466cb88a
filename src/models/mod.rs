mod filter;
mod notification;
mod project;
mod user;

pub use filter::{FilterCriteria, StatusFilter, TypeFilter};
pub use notification::{unread_count, Notification};
pub use project::{Project, ProjectStatus, ProjectType};
pub use user::{Role, User};
