//! Shared Queue - bounded FIFO buffer between computers and printers
//!
//! A monitor: one mutex over the job sequence (its length is the counter, so
//! both change as one unit) and two broadcast conditions, "space available"
//! and "item available".
//!
//! Waiters create their `Notified` future *before* checking the condition
//! under the lock. `Notify::notify_waiters` wakes every future created before
//! the call, polled or not, so a state change between the check and the
//! `.await` is never missed. Every wake re-checks the condition in a loop.

use crate::application::worker::ShutdownToken;
use crate::domain::{DomainError, PrintJob, QueueConfig};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, info};

/// Outcome of an interrupted queue operation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue operation cancelled by shutdown")]
    Cancelled,
}

/// Capacity-bounded FIFO with blocking, cancellable insert and remove
pub struct SharedQueue {
    capacity: usize,
    jobs: Mutex<VecDeque<PrintJob>>,
    space_available: Notify,
    item_available: Notify,
}

impl SharedQueue {
    /// Create an empty queue holding at most `capacity` jobs
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        Ok(Self::with_config(QueueConfig::new(capacity)?))
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            capacity: config.capacity(),
            jobs: Mutex::new(VecDeque::with_capacity(config.capacity())),
            space_available: Notify::new(),
            item_available: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.len()
    }

    /// Append `job` at the tail, waiting while the queue is full.
    ///
    /// Returns `QueueError::Cancelled` if shutdown is (or becomes) signalled
    /// while the queue is full; the job is then not enqueued. An insert that
    /// finds space completes regardless of shutdown.
    pub async fn insert(&self, job: PrintJob, shutdown: &ShutdownToken) -> Result<(), QueueError> {
        let mut announced_wait = false;
        loop {
            let space = self.space_available.notified();
            {
                let mut jobs = self.lock();
                if jobs.len() < self.capacity {
                    info!(job = %job, queued = jobs.len() + 1, "Added job to the queue");
                    jobs.push_back(job);
                    drop(jobs);
                    self.item_available.notify_waiters();
                    return Ok(());
                }
            }

            if shutdown.is_shutdown() {
                return Err(QueueError::Cancelled);
            }
            if !announced_wait {
                info!(capacity = self.capacity, "Queue is full, waiting for space");
                announced_wait = true;
            }

            tokio::select! {
                _ = space => {}
                _ = shutdown.wait() => {
                    debug!(job = %job, "Insert cancelled while queue was full");
                    return Err(QueueError::Cancelled);
                }
            }
        }
    }

    /// Take the head job, waiting while the queue is empty.
    ///
    /// Returns `QueueError::Cancelled` if shutdown is (or becomes) signalled
    /// while the queue is empty.
    pub async fn remove(&self, shutdown: &ShutdownToken) -> Result<PrintJob, QueueError> {
        loop {
            let item = self.item_available.notified();
            {
                let mut jobs = self.lock();
                if let Some(job) = jobs.pop_front() {
                    info!(job = %job, queued = jobs.len(), "Removed job from the queue");
                    drop(jobs);
                    self.space_available.notify_waiters();
                    return Ok(job);
                }
            }

            if shutdown.is_shutdown() {
                return Err(QueueError::Cancelled);
            }

            tokio::select! {
                _ = item => {}
                _ = shutdown.wait() => return Err(QueueError::Cancelled),
            }
        }
    }

    /// Resolve once the queue holds no jobs
    pub async fn wait_until_empty(&self) {
        loop {
            let space = self.space_available.notified();
            if self.is_empty() {
                return;
            }
            space.await;
        }
    }

    // Push/pop leave the deque consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, VecDeque<PrintJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::worker::shutdown_channel;
    use crate::domain::FileType;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    fn job(name: &str) -> PrintJob {
        PrintJob::new(name, FileType::Pdf).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SharedQueue::new(0),
            Err(DomainError::InvalidCapacity(0))
        ));
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let (_tx, token) = shutdown_channel();
        let queue = SharedQueue::new(5).unwrap();

        for name in ["a", "b", "c", "d"] {
            queue.insert(job(name), &token).await.unwrap();
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.remaining_capacity(), 1);

        for name in ["a", "b", "c", "d"] {
            assert_eq!(queue.remove(&token).await.unwrap().file_name(), name);
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_insert_blocks_when_full_until_remove() {
        // capacity 2: A and B fit, C must wait for a remove
        let (_tx, token) = shutdown_channel();
        let queue = SharedQueue::new(2).unwrap();
        queue.insert(job("A"), &token).await.unwrap();
        queue.insert(job("B"), &token).await.unwrap();

        let mut insert_c = task::spawn(queue.insert(job("C"), &token));
        assert_pending!(insert_c.poll());
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "A");
        assert!(insert_c.is_woken(), "blocked insert must be woken by remove");
        assert_ready_eq!(insert_c.poll(), Ok(()));
        drop(insert_c);

        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "B");
        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "C");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_remove_blocks_when_empty_until_insert() {
        let (_tx, token) = shutdown_channel();
        let queue = SharedQueue::new(1).unwrap();

        let mut remove = task::spawn(queue.remove(&token));
        assert_pending!(remove.poll());

        queue.insert(job("late"), &token).await.unwrap();
        assert!(remove.is_woken());
        assert_ready_eq!(remove.poll(), Ok(job("late")));
    }

    #[tokio::test]
    async fn test_no_lost_wakeup_capacity_one() {
        let (_tx, token) = shutdown_channel();
        let queue = Arc::new(SharedQueue::new(1).unwrap());
        queue.insert(job("first"), &token).await.unwrap();

        let blocked = tokio::spawn({
            let queue = queue.clone();
            let token = token.clone();
            async move { queue.insert(job("second"), &token).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!blocked.is_finished());

        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "first");

        let result = tokio::time::timeout(Duration::from_secs(2), blocked).await;
        assert!(result.is_ok(), "blocked insert should complete once space frees");
        assert_eq!(result.unwrap().unwrap(), Ok(()));
        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "second");
    }

    #[tokio::test]
    async fn test_every_waiter_woken_on_state_change() {
        // broadcast wake: three blocked removers, three inserts, all complete
        let (_tx, token) = shutdown_channel();
        let queue = Arc::new(SharedQueue::new(3).unwrap());

        let mut removers = JoinSet::new();
        for _ in 0..3 {
            let queue = queue.clone();
            let token = token.clone();
            removers.spawn(async move { queue.remove(&token).await });
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        for name in ["x", "y", "z"] {
            queue.insert(job(name), &token).await.unwrap();
        }

        let mut names = HashSet::new();
        while let Some(joined) = tokio::time::timeout(Duration::from_secs(2), removers.join_next())
            .await
            .expect("remover left unwoken")
        {
            names.insert(joined.unwrap().unwrap().file_name().to_string());
        }
        assert_eq!(names.len(), 3);
    }

    #[tokio::test]
    async fn test_blocked_insert_cancelled_by_shutdown() {
        let (tx, token) = shutdown_channel();
        let queue = SharedQueue::new(1).unwrap();
        queue.insert(job("kept"), &token).await.unwrap();

        let mut insert = task::spawn(queue.insert(job("dropped"), &token));
        assert_pending!(insert.poll());

        tx.shutdown();
        assert!(insert.is_woken());
        assert_ready_eq!(insert.poll(), Err(QueueError::Cancelled));
        drop(insert);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "kept");
    }

    #[tokio::test]
    async fn test_blocked_remove_cancelled_by_shutdown() {
        let (tx, token) = shutdown_channel();
        let queue = Arc::new(SharedQueue::new(2).unwrap());

        let blocked = tokio::spawn({
            let queue = queue.clone();
            let token = token.clone();
            async move { queue.remove(&token).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(1), blocked).await;
        assert_eq!(result.unwrap().unwrap(), Err(QueueError::Cancelled));
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_operations_that_need_no_wait_complete_after_shutdown() {
        let (tx, token) = shutdown_channel();
        let queue = SharedQueue::new(1).unwrap();
        tx.shutdown();

        queue.insert(job("fits"), &token).await.unwrap();
        assert_eq!(
            queue.insert(job("full"), &token).await,
            Err(QueueError::Cancelled)
        );
        assert_eq!(queue.remove(&token).await.unwrap().file_name(), "fits");
        assert_eq!(queue.remove(&token).await, Err(QueueError::Cancelled));
    }

    #[tokio::test]
    async fn test_wait_until_empty() {
        let (_tx, token) = shutdown_channel();
        let queue = SharedQueue::new(2).unwrap();
        queue.insert(job("a"), &token).await.unwrap();
        queue.insert(job("b"), &token).await.unwrap();

        let mut drained = task::spawn(queue.wait_until_empty());
        assert_pending!(drained.poll());

        queue.remove(&token).await.unwrap();
        assert_pending!(drained.poll());

        queue.remove(&token).await.unwrap();
        assert!(drained.is_woken());
        assert_ready_eq!(drained.poll(), ());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_capacity_and_conservation() {
        const PRODUCERS: usize = 6;
        const CONSUMERS: usize = 4;
        const PER_PRODUCER: usize = 200;
        const CAPACITY: usize = 3;

        let (_tx, token) = shutdown_channel();
        let queue = Arc::new(SharedQueue::new(CAPACITY).unwrap());

        let mut producers = JoinSet::new();
        for p in 0..PRODUCERS {
            let queue = queue.clone();
            let token = token.clone();
            producers.spawn(async move {
                for i in 0..PER_PRODUCER {
                    queue.insert(job(&format!("p{}-{}", p, i)), &token).await.unwrap();
                    assert!(queue.len() <= CAPACITY);
                }
            });
        }

        let (stop_tx, stop) = shutdown_channel();
        let mut consumers = JoinSet::new();
        for _ in 0..CONSUMERS {
            let queue = queue.clone();
            let stop = stop.clone();
            consumers.spawn(async move {
                let mut seen = Vec::new();
                while let Ok(job) = queue.remove(&stop).await {
                    assert!(queue.len() <= CAPACITY);
                    seen.push(job.file_name().to_string());
                }
                seen
            });
        }

        while let Some(joined) = producers.join_next().await {
            joined.unwrap();
        }
        tokio::time::timeout(Duration::from_secs(5), queue.wait_until_empty())
            .await
            .expect("queue should drain");
        stop_tx.shutdown();

        let mut all = Vec::new();
        while let Some(joined) = consumers.join_next().await {
            let seen = joined.unwrap();
            // per-producer order survives because global order does
            for p in 0..PRODUCERS {
                let prefix = format!("p{}-", p);
                let indices: Vec<usize> = seen
                    .iter()
                    .filter_map(|n| n.strip_prefix(&prefix))
                    .map(|i| i.parse().unwrap())
                    .collect();
                assert!(indices.windows(2).all(|w| w[0] < w[1]));
            }
            all.extend(seen);
        }

        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), PRODUCERS * PER_PRODUCER, "no loss");
        assert_eq!(unique.len(), all.len(), "no duplication");
    }
}
