//! Print Spooler - Main Entry Point
//! Computers submit print jobs to a bounded shared queue; printers drain it.

mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use spooler_core::application::{shutdown_channel, Spooler};
use spooler_core::port::id_provider::ClockIdProvider;
use spooler_core::port::JobSource;
use spooler_infra_fs::FsJobSource;

use crate::config::Args;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration (flags or SPOOLER_* env vars, all optional)
    let args = Args::parse();

    // 2. Logging
    let _log_guard = logging::init_logging(args.log_format, args.log_dir.as_deref())?;
    info!("Print Spooler v{} starting...", VERSION);

    // 3. Wiring
    let config = args.spooler_config();
    let job_source: Option<Arc<dyn JobSource>> = config
        .online_source
        .as_ref()
        .map(|_| Arc::new(FsJobSource::new()) as Arc<dyn JobSource>);
    let spooler = Spooler::new(config, Arc::new(ClockIdProvider::default()), job_source);

    // 4. Run until computers finish and the queue drains, or Ctrl+C
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let run = spooler.run(shutdown_rx);
    tokio::pin!(run);

    let summary = tokio::select! {
        result = &mut run => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Stopping computers and printers...");
            shutdown_tx.shutdown();
            run.await?
        }
    };

    info!(
        enqueued = summary.enqueued,
        rejected = summary.rejected,
        printed = summary.printed,
        "Shutdown complete."
    );

    Ok(())
}
