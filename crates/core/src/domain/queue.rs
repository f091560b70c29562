// Queue Domain Model

use super::error::{DomainError, Result};

/// Shared queue configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    capacity: usize,
}

impl QueueConfig {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity(capacity));
        }
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
