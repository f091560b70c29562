// Spooler constants (no magic values)

/// Shared queue capacity (jobs)
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Number of computers submitting random jobs
pub const DEFAULT_PRODUCER_COUNT: usize = 3;

/// Number of printers draining the queue
pub const DEFAULT_CONSUMER_COUNT: usize = 2;

/// Jobs each computer attempts before it finishes
pub const DEFAULT_JOBS_PER_PRODUCER: usize = 50;

/// Upper bound (exclusive) of the random pause between two submissions
pub const DEFAULT_PRODUCER_DELAY_MAX_MS: u64 = 2300;

/// Simulated time a printer spends on one job
pub const DEFAULT_CONSUMER_PROCESSING_DELAY_MS: u64 = 5000;

/// Records the online computer reads from its job source
pub const DEFAULT_ONLINE_RECORDS: usize = 10;

/// Extension of job record files in the online jobs directory
pub const ONLINE_RECORD_EXTENSION: &str = "txt";
