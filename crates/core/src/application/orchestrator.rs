//! Spooler - creates the shared queue, runs computers and printers, shuts down
//!
//! Order of a run:
//! 1. start printers, then computers (plus the online computer if configured)
//! 2. wait for every computer to finish
//! 3. wait for the printers to drain the queue
//! 4. stop the printers and collect their reports
//!
//! An external shutdown skips the drain and stops everyone promptly.

use crate::application::online::{OnlineProducer, OnlineReport, OnlineSourceConfig};
use crate::application::shared_queue::SharedQueue;
use crate::application::worker::constants::*;
use crate::application::worker::{
    shutdown_channel, Consumer, ConsumerReport, Producer, ProducerConfig, ProducerReport,
    ShutdownToken,
};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, JobSource};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};

/// Spooler configuration (all values have defaults)
#[derive(Debug, Clone)]
pub struct SpoolerConfig {
    pub queue_capacity: usize,
    pub producer_count: usize,
    pub consumer_count: usize,
    pub jobs_per_producer: usize,
    pub producer_delay_max_ms: u64,
    pub consumer_processing_delay_ms: u64,
    pub online_source: Option<OnlineSourceConfig>,
}

impl Default for SpoolerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            producer_count: DEFAULT_PRODUCER_COUNT,
            consumer_count: DEFAULT_CONSUMER_COUNT,
            jobs_per_producer: DEFAULT_JOBS_PER_PRODUCER,
            producer_delay_max_ms: DEFAULT_PRODUCER_DELAY_MAX_MS,
            consumer_processing_delay_ms: DEFAULT_CONSUMER_PROCESSING_DELAY_MS,
            online_source: None,
        }
    }
}

impl SpoolerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(AppError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        let produces = (self.producer_count > 0 && self.jobs_per_producer > 0)
            || self.online_source.as_ref().is_some_and(|o| o.records > 0);
        if produces && self.consumer_count == 0 {
            return Err(AppError::Config(
                "consumer_count must be at least 1 when jobs are produced".to_string(),
            ));
        }
        Ok(())
    }

    fn producer_config(&self) -> ProducerConfig {
        ProducerConfig {
            jobs: self.jobs_per_producer,
            delay_max: Duration::from_millis(self.producer_delay_max_ms),
        }
    }
}

/// Totals of one spooler run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub enqueued: usize,
    pub rejected: usize,
    pub read_failures: usize,
    pub removed: usize,
    pub printed: usize,
    /// Printers stopped in the middle of a print
    pub interrupted: usize,
    /// Queue was empty when printers were stopped
    pub drained: bool,
}

/// Report of either kind of computer
#[derive(Debug)]
enum ComputerReport {
    Random(ProducerReport),
    Online(OnlineReport),
}

impl RunSummary {
    fn add_computer(&mut self, report: &ComputerReport) {
        match report {
            ComputerReport::Random(r) => {
                self.enqueued += r.enqueued;
                self.rejected += r.rejected;
            }
            ComputerReport::Online(r) => {
                self.enqueued += r.enqueued;
                self.rejected += r.rejected;
                self.read_failures += r.read_failures;
            }
        }
    }

    fn add_consumer(&mut self, report: &ConsumerReport) {
        self.removed += report.removed;
        self.printed += report.printed;
        if report.interrupted {
            self.interrupted += 1;
        }
    }
}

/// Orchestrator
pub struct Spooler {
    config: SpoolerConfig,
    id_provider: Arc<dyn IdProvider>,
    job_source: Option<Arc<dyn JobSource>>,
}

impl Spooler {
    /// `job_source` feeds the online computer and is required when
    /// `config.online_source` is set.
    pub fn new(
        config: SpoolerConfig,
        id_provider: Arc<dyn IdProvider>,
        job_source: Option<Arc<dyn JobSource>>,
    ) -> Self {
        Self {
            config,
            id_provider,
            job_source,
        }
    }

    /// Configuration checks plus the wiring this spooler was given
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.config.online_source.is_some() && self.job_source.is_none() {
            return Err(AppError::Config(
                "online_source is set but no job source was provided".to_string(),
            ));
        }
        Ok(())
    }

    /// Run computers to completion, drain the queue, stop printers.
    ///
    /// Role failures are logged and never abort the run; the only error is an
    /// invalid configuration.
    pub async fn run(&self, shutdown: ShutdownToken) -> Result<RunSummary> {
        self.validate()?;
        let queue = Arc::new(SharedQueue::new(self.config.queue_capacity)?);
        info!(
            capacity = self.config.queue_capacity,
            computers = self.config.producer_count,
            printers = self.config.consumer_count,
            "Spooler starting"
        );

        let (printer_stop, printer_token) = shutdown_channel();
        let mut printers = JoinSet::new();
        let processing_delay = Duration::from_millis(self.config.consumer_processing_delay_ms);
        for n in 1..=self.config.consumer_count {
            let printer = Consumer::new(format!("Printer {}", n), queue.clone(), processing_delay);
            let token = printer_token.clone();
            let span = info_span!("printer", id = n);
            printers.spawn(async move { printer.run(token).await }.instrument(span));
        }

        let mut computers = JoinSet::new();
        for n in 1..=self.config.producer_count {
            let computer = Producer::new(
                format!("Computer {}", n),
                queue.clone(),
                self.id_provider.clone(),
                self.config.producer_config(),
            );
            let token = shutdown.clone();
            let span = info_span!("computer", id = n);
            computers.spawn(
                async move { ComputerReport::Random(computer.run(token).await) }.instrument(span),
            );
        }
        self.spawn_online(&mut computers, &queue, &shutdown);

        let mut summary = RunSummary::default();
        while let Some(joined) = computers.join_next().await {
            match joined {
                Ok(report) => summary.add_computer(&report),
                Err(e) => error!(error = %e, "Computer task failed"),
            }
        }
        info!(
            enqueued = summary.enqueued,
            rejected = summary.rejected,
            "All computers finished, draining queue"
        );

        let drained = tokio::select! {
            biased;
            _ = queue.wait_until_empty() => true,
            _ = shutdown.wait() => false,
            _ = collect_printers(&mut printers, &mut summary) => {
                error!("Every printer exited before the queue drained");
                false
            }
        };
        summary.drained = drained;

        printer_stop.shutdown();
        collect_printers(&mut printers, &mut summary).await;

        info!(
            enqueued = summary.enqueued,
            removed = summary.removed,
            printed = summary.printed,
            drained = summary.drained,
            "Spooler stopped"
        );
        Ok(summary)
    }

    fn spawn_online(
        &self,
        computers: &mut JoinSet<ComputerReport>,
        queue: &Arc<SharedQueue>,
        shutdown: &ShutdownToken,
    ) {
        // validate() guarantees a source whenever online jobs are configured
        let (Some(online), Some(source)) =
            (self.config.online_source.clone(), self.job_source.clone())
        else {
            return;
        };
        let computer = OnlineProducer::new("Online", queue.clone(), source, online);
        let token = shutdown.clone();
        let span = info_span!("computer", id = "online");
        computers.spawn(
            async move { ComputerReport::Online(computer.run(token).await) }.instrument(span),
        );
    }
}

async fn collect_printers(printers: &mut JoinSet<ConsumerReport>, summary: &mut RunSummary) {
    while let Some(joined) = printers.join_next().await {
        match joined {
            Ok(report) => summary.add_consumer(&report),
            Err(e) => error!(error = %e, "Printer task failed"),
        }
    }
}
