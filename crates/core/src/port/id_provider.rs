// ID Provider Port (for deterministic testing)

use super::time_provider::{SystemTimeProvider, TimeProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique job file name
    fn generate_id(&self) -> String;
}

/// Clock-based provider (production): `file<millis>-<seq>`.
///
/// Millisecond timestamps alone collide when several computers submit in the
/// same tick, so a process-wide sequence number is appended.
pub struct ClockIdProvider {
    time_provider: Arc<dyn TimeProvider>,
    seq: AtomicU64,
}

impl ClockIdProvider {
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            time_provider,
            seq: AtomicU64::new(0),
        }
    }
}

impl Default for ClockIdProvider {
    fn default() -> Self {
        Self::new(Arc::new(SystemTimeProvider))
    }
}

impl IdProvider for ClockIdProvider {
    fn generate_id(&self) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("file{}-{}", self.time_provider.now_millis(), seq)
    }
}

pub mod mocks {
    use super::IdProvider;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Deterministic IDs: `job-1`, `job-2`, ...
    #[derive(Default)]
    pub struct SequentialIdProvider {
        counter: AtomicU64,
    }

    impl IdProvider for SequentialIdProvider {
        fn generate_id(&self) -> String {
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            format!("job-{}", n)
        }
    }
}
