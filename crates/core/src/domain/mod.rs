// Domain Layer - Pure business logic and entities

pub mod clinic;
pub mod entry;
pub mod error;
pub mod user;

// Re-exports
pub use clinic::{Clinic, ClinicId, ClinicStatus};
pub use entry::{EntryId, PatientId, Priority, QueueEntry, QueueStatus};
pub use error::QueueError;
pub use user::{SessionUser, User, UserId, UserRole};
