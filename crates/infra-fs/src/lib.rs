// Print Spooler Infrastructure - Filesystem Adapters
// Implements: JobSource

pub mod fs_job_source;

pub use fs_job_source::FsJobSource;
