//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod channel_repo;
pub mod program_repo;
pub mod reminder_repo;

pub use channel_repo::ChannelRepo;
pub use program_repo::ProgramRepo;
pub use reminder_repo::ReminderRepo;
