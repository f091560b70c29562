// Application Layer - Shared queue, roles and orchestration

pub mod online;
pub mod orchestrator;
pub mod shared_queue;
pub mod worker;

// Re-exports
pub use online::{OnlineProducer, OnlineReport, OnlineSourceConfig};
pub use orchestrator::{RunSummary, Spooler, SpoolerConfig};
pub use shared_queue::{QueueError, SharedQueue};
pub use worker::{
    shutdown_channel, Consumer, ConsumerReport, Producer, ProducerConfig, ProducerReport,
    ShutdownSender, ShutdownToken,
};
