// Print Spooler Core - Domain Logic, Bounded Queue & Ports
// NO filesystem or process wiring (adapters live in infra crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
