//! Daemon configuration
//!
//! Every setting has a default, so the spooler runs with no flags at all.
//! Each flag can also be set through its `SPOOLER_*` environment variable.

use clap::{Parser, ValueEnum};
use spooler_core::application::worker::constants::*;
use spooler_core::application::{OnlineSourceConfig, SpoolerConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "print-spooler")]
#[command(about = "Simulated print spooler: computers submit jobs, printers drain a shared queue", long_about = None)]
#[command(version)]
pub struct Args {
    /// Shared queue capacity
    #[arg(long, env = "SPOOLER_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Number of computers submitting random jobs
    #[arg(long, env = "SPOOLER_PRODUCERS", default_value_t = DEFAULT_PRODUCER_COUNT)]
    pub producers: usize,

    /// Number of printers
    #[arg(long, env = "SPOOLER_CONSUMERS", default_value_t = DEFAULT_CONSUMER_COUNT)]
    pub consumers: usize,

    /// Jobs each computer attempts
    #[arg(long, env = "SPOOLER_JOBS_PER_PRODUCER", default_value_t = DEFAULT_JOBS_PER_PRODUCER)]
    pub jobs_per_producer: usize,

    /// Maximum random pause between two submissions (ms)
    #[arg(long, env = "SPOOLER_PRODUCER_DELAY_MAX_MS", default_value_t = DEFAULT_PRODUCER_DELAY_MAX_MS)]
    pub producer_delay_max_ms: u64,

    /// Time a printer spends on one job (ms)
    #[arg(long, env = "SPOOLER_PRINT_DELAY_MS", default_value_t = DEFAULT_CONSUMER_PROCESSING_DELAY_MS)]
    pub print_delay_ms: u64,

    /// Directory of online job records (0.txt, 1.txt, ...); enables the online computer
    #[arg(long, env = "SPOOLER_ONLINE_JOBS_DIR")]
    pub online_jobs_dir: Option<PathBuf>,

    /// Number of online job records to read
    #[arg(long, env = "SPOOLER_ONLINE_JOBS", default_value_t = DEFAULT_ONLINE_RECORDS)]
    pub online_jobs: usize,

    /// Console log format
    #[arg(long, env = "SPOOLER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, env = "SPOOLER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn spooler_config(&self) -> SpoolerConfig {
        SpoolerConfig {
            queue_capacity: self.queue_capacity,
            producer_count: self.producers,
            consumer_count: self.consumers,
            jobs_per_producer: self.jobs_per_producer,
            producer_delay_max_ms: self.producer_delay_max_ms,
            consumer_processing_delay_ms: self.print_delay_ms,
            online_source: self.online_jobs_dir.as_ref().map(|dir| OnlineSourceConfig {
                jobs_dir: dir.clone(),
                records: self.online_jobs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = Args::try_parse_from(["print-spooler"]).unwrap();
        let config = args.spooler_config();
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.producer_count, DEFAULT_PRODUCER_COUNT);
        assert_eq!(config.consumer_count, DEFAULT_CONSUMER_COUNT);
        assert_eq!(config.jobs_per_producer, DEFAULT_JOBS_PER_PRODUCER);
        assert!(config.online_source.is_none());
        assert_eq!(args.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "print-spooler",
            "--queue-capacity",
            "1",
            "--consumers",
            "4",
            "--online-jobs-dir",
            "/var/spool/online",
            "--online-jobs",
            "3",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = args.spooler_config();
        assert_eq!(config.queue_capacity, 1);
        assert_eq!(config.consumer_count, 4);
        let online = config.online_source.unwrap();
        assert_eq!(online.jobs_dir, PathBuf::from("/var/spool/online"));
        assert_eq!(online.records, 3);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
