// Worker roles - computers (producers) and printers (consumers)

pub mod constants;
mod consumer;
mod producer;
mod shutdown;

pub use consumer::{Consumer, ConsumerReport};
pub use producer::{Producer, ProducerConfig, ProducerReport};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
