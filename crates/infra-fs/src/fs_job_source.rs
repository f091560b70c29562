// Filesystem job source
// Record format: line 1 = file name, line 2 = file type tag
use async_trait::async_trait;
use tracing::debug;

use spooler_core::error::{AppError, Result};
use spooler_core::port::job_source::{JobRecord, JobSource};

/// Reads two-line job records from text files
#[derive(Debug, Default, Clone, Copy)]
pub struct FsJobSource;

impl FsJobSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobSource for FsJobSource {
    async fn read_job_record(&self, path: &str) -> Result<JobRecord> {
        let content = tokio::fs::read_to_string(path).await?;
        let record = parse_record(path, &content)?;
        debug!(path = %path, name = %record.name, tag = %record.file_type_tag, "Read job record");
        Ok(record)
    }
}

fn parse_record(path: &str, content: &str) -> Result<JobRecord> {
    let mut lines = content.lines();
    let name = lines.next().ok_or_else(|| invalid(path, "missing file name line"))?;
    let tag = lines
        .next()
        .ok_or_else(|| invalid(path, "missing file type line"))?;
    Ok(JobRecord::new(name.trim(), tag.trim()))
}

fn invalid(path: &str, reason: &str) -> AppError {
    AppError::InvalidRecord {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
