// Online Producer - a computer submitting jobs read from a job source

use crate::application::shared_queue::{QueueError, SharedQueue};
use crate::application::worker::constants::{DEFAULT_ONLINE_RECORDS, ONLINE_RECORD_EXTENSION};
use crate::application::worker::ShutdownToken;
use crate::domain::{FileType, PrintJob};
use crate::port::JobSource;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Where the online computer finds its records
#[derive(Debug, Clone)]
pub struct OnlineSourceConfig {
    /// Directory holding `0.txt`, `1.txt`, ...
    pub jobs_dir: PathBuf,
    /// Number of records to read
    pub records: usize,
}

impl OnlineSourceConfig {
    pub fn new(jobs_dir: impl Into<PathBuf>) -> Self {
        Self {
            jobs_dir: jobs_dir.into(),
            records: DEFAULT_ONLINE_RECORDS,
        }
    }

    /// Location of the `index`-th record
    pub fn record_path(&self, index: usize) -> PathBuf {
        record_path(&self.jobs_dir, index)
    }
}

fn record_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{}.{}", index, ONLINE_RECORD_EXTENSION))
}

/// What the online computer did before it finished or was stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnlineReport {
    pub enqueued: usize,
    pub rejected: usize,
    /// Records that were missing or malformed
    pub read_failures: usize,
    pub cancelled: bool,
}

/// Reads the N-th record for iteration N and submits it without pausing.
/// Read failures and unsupported types are logged and skipped.
pub struct OnlineProducer {
    name: String,
    queue: Arc<SharedQueue>,
    source: Arc<dyn JobSource>,
    config: OnlineSourceConfig,
}

impl OnlineProducer {
    pub fn new(
        name: impl Into<String>,
        queue: Arc<SharedQueue>,
        source: Arc<dyn JobSource>,
        config: OnlineSourceConfig,
    ) -> Self {
        Self {
            name: name.into(),
            queue,
            source,
            config,
        }
    }

    pub async fn run(&self, shutdown: ShutdownToken) -> OnlineReport {
        info!(
            computer = %self.name,
            jobs_dir = %self.config.jobs_dir.display(),
            records = self.config.records,
            "Online computer started"
        );
        let mut report = OnlineReport::default();

        for index in 0..self.config.records {
            if shutdown.is_shutdown() {
                report.cancelled = true;
                break;
            }

            let path = self.config.record_path(index);
            let path = path.to_string_lossy();
            let record = match self.source.read_job_record(&path).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(computer = %self.name, path = %path, error = %e, "Error reading job record");
                    report.read_failures += 1;
                    continue;
                }
            };

            let job = match PrintJob::new(record.name, FileType::from_tag(&record.file_type_tag)) {
                Ok(job) => job,
                Err(e) => {
                    warn!(
                        computer = %self.name,
                        path = %path,
                        error = %e,
                        "Rejected print job, try with a different file type"
                    );
                    report.rejected += 1;
                    continue;
                }
            };

            match self.queue.insert(job, &shutdown).await {
                Ok(()) => report.enqueued += 1,
                Err(QueueError::Cancelled) => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        info!(
            computer = %self.name,
            enqueued = report.enqueued,
            rejected = report.rejected,
            read_failures = report.read_failures,
            "Online computer finished"
        );
        report
    }
}
