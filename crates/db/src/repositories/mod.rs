//! Repository structs, one per table group.
//!
//! Every repository is a zero-sized struct whose associated functions take
//! the pool as their first argument. Updates are guarded by the row version
//! the caller last saw and return `None` when the row is gone or has moved on.

pub mod page_repo;
pub mod performer_repo;
pub mod section_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use page_repo::PageRepo;
pub use performer_repo::PerformerRepo;
pub use section_repo::SectionRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
