// Domain Layer - Print jobs, file types and queue configuration

pub mod error;
pub mod job;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use job::{FileType, JobId, PrintJob};
pub use queue::QueueConfig;
