// Consumer role - a printer draining the shared queue

use super::constants::DEFAULT_CONSUMER_PROCESSING_DELAY_MS;
use super::shutdown::ShutdownToken;
use crate::application::shared_queue::SharedQueue;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// What a printer did before it was stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerReport {
    /// Jobs taken off the queue
    pub removed: usize,
    /// Jobs whose simulated print finished
    pub printed: usize,
    /// Stop arrived in the middle of a print
    pub interrupted: bool,
}

/// Printer: remove, print for a fixed time, repeat until stopped.
///
/// Never inspects jobs; only valid jobs reach the queue.
pub struct Consumer {
    name: String,
    queue: Arc<SharedQueue>,
    processing_delay: Duration,
}

impl Consumer {
    pub fn new(name: impl Into<String>, queue: Arc<SharedQueue>, processing_delay: Duration) -> Self {
        Self {
            name: name.into(),
            queue,
            processing_delay,
        }
    }

    pub fn with_default_delay(name: impl Into<String>, queue: Arc<SharedQueue>) -> Self {
        Self::new(
            name,
            queue,
            Duration::from_millis(DEFAULT_CONSUMER_PROCESSING_DELAY_MS),
        )
    }

    /// Run until shutdown; there is no natural end
    pub async fn run(&self, shutdown: ShutdownToken) -> ConsumerReport {
        info!(printer = %self.name, "Printer started");
        let mut report = ConsumerReport::default();

        while !shutdown.is_shutdown() {
            let job = match self.queue.remove(&shutdown).await {
                Ok(job) => job,
                Err(_) => break,
            };
            report.removed += 1;
            debug!(printer = %self.name, job = %job, "Printing");

            tokio::select! {
                _ = sleep(self.processing_delay) => {
                    report.printed += 1;
                    debug!(printer = %self.name, job = %job, "Printed");
                }
                _ = shutdown.wait() => {
                    warn!(printer = %self.name, job = %job, "Printing interrupted by shutdown");
                    report.interrupted = true;
                    break;
                }
            }
        }

        info!(
            printer = %self.name,
            printed = report.printed,
            "Printer stopped"
        );
        report
    }
}
