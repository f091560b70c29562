// Domain Error Types

use super::job::FileType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("File type not supported: {0}")]
    UnsupportedFileType(FileType),

    #[error("File name must not be empty")]
    EmptyFileName,

    #[error("Invalid queue capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

pub type Result<T> = std::result::Result<T, DomainError>;
