// Producer role - a computer submitting random print jobs

use super::constants::{DEFAULT_JOBS_PER_PRODUCER, DEFAULT_PRODUCER_DELAY_MAX_MS};
use super::shutdown::ShutdownToken;
use crate::application::shared_queue::{QueueError, SharedQueue};
use crate::domain::{FileType, PrintJob};
use crate::port::IdProvider;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Producer settings
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Iterations before the computer finishes
    pub jobs: usize,
    /// Exclusive upper bound of the random pause between iterations
    pub delay_max: Duration,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS_PER_PRODUCER,
            delay_max: Duration::from_millis(DEFAULT_PRODUCER_DELAY_MAX_MS),
        }
    }
}

/// What a producer did before it finished or was stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProducerReport {
    pub enqueued: usize,
    pub rejected: usize,
    pub cancelled: bool,
}

/// Computer: picks a random file type each iteration, builds a job and
/// inserts it. Unsupported types are logged and skipped, never retried.
pub struct Producer {
    name: String,
    queue: Arc<SharedQueue>,
    id_provider: Arc<dyn IdProvider>,
    config: ProducerConfig,
}

impl Producer {
    pub fn new(
        name: impl Into<String>,
        queue: Arc<SharedQueue>,
        id_provider: Arc<dyn IdProvider>,
        config: ProducerConfig,
    ) -> Self {
        Self {
            name: name.into(),
            queue,
            id_provider,
            config,
        }
    }

    /// Run all iterations, or until shutdown
    pub async fn run(&self, shutdown: ShutdownToken) -> ProducerReport {
        info!(computer = %self.name, jobs = self.config.jobs, "Computer started");
        let mut report = ProducerReport::default();

        for _ in 0..self.config.jobs {
            if shutdown.is_shutdown() {
                report.cancelled = true;
                break;
            }

            let file_type = random_file_type();
            match PrintJob::new(self.id_provider.generate_id(), file_type) {
                Ok(job) => match self.queue.insert(job, &shutdown).await {
                    Ok(()) => report.enqueued += 1,
                    Err(QueueError::Cancelled) => {
                        report.cancelled = true;
                        break;
                    }
                },
                Err(e) => {
                    warn!(
                        computer = %self.name,
                        error = %e,
                        "Rejected print job, try with a different file type"
                    );
                    report.rejected += 1;
                }
            }

            tokio::select! {
                _ = sleep(random_delay(self.config.delay_max)) => {}
                _ = shutdown.wait() => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        if report.cancelled {
            info!(computer = %self.name, "Computer interrupted");
        }
        info!(
            computer = %self.name,
            enqueued = report.enqueued,
            rejected = report.rejected,
            "Computer finished"
        );
        report
    }
}

// Keep the thread-local rng out of the async state: it is not Send.
fn random_file_type() -> FileType {
    let index = rand::thread_rng().gen_range(0..FileType::ALL.len());
    FileType::ALL[index]
}

fn random_delay(max: Duration) -> Duration {
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
}
