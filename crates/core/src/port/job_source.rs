// Job Source Port - where "online" print jobs come from
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A parsed job record: file name on the first line, type tag on the second
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    pub file_type_tag: String,
}

impl JobRecord {
    pub fn new(name: impl Into<String>, file_type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type_tag: file_type_tag.into(),
        }
    }
}

/// Job source port
///
/// The core only ever sees the parsed pair; how the record is stored is the
/// adapter's business.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Read one job record from a named resource
    ///
    /// # Errors
    /// * `AppError::Io` - resource missing or unreadable
    /// * `AppError::InvalidRecord` - fewer than two lines
    async fn read_job_record(&self, path: &str) -> Result<JobRecord>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory job source keyed by path; unknown paths fail with NotFound
    #[derive(Default)]
    pub struct MockJobSource {
        records: HashMap<String, JobRecord>,
        reads: Mutex<Vec<String>>,
    }

    impl MockJobSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_record(mut self, path: impl Into<String>, record: JobRecord) -> Self {
            self.records.insert(path.into(), record);
            self
        }

        /// Paths requested so far, in order
        pub fn reads(&self) -> Vec<String> {
            self.reads.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl JobSource for MockJobSource {
        async fn read_job_record(&self, path: &str) -> Result<JobRecord> {
            if let Ok(mut reads) = self.reads.lock() {
                reads.push(path.to_string());
            }
            self.records.get(path).cloned().ok_or_else(|| {
                AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no record at {}", path),
                ))
            })
        }
    }
}
