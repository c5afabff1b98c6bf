use std::ops::Range;

use crate::errors::GenerationError;

/// Splits `total` record indexes into consecutive batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    total: u64,
    batch_size: u64,
}

impl BatchPlan {
    pub fn new(total: u64, batch_size: u64) -> Result<Self, GenerationError> {
        if batch_size == 0 {
            return Err(GenerationError::InvalidOptions(
                "batch size must be > 0".to_string(),
            ));
        }
        if total > i32::MAX as u64 {
            return Err(GenerationError::InvalidOptions(format!(
                "record count {total} exceeds the customer id range"
            )));
        }
        Ok(Self { total, batch_size })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    pub fn batch_count(&self) -> u64 {
        self.total.div_ceil(self.batch_size)
    }

    /// Half-open index ranges, the last one possibly shorter.
    pub fn ranges(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        (0..self.total)
            .step_by(self.batch_size as usize)
            .map(|start| start..(start + self.batch_size).min(self.total))
    }
}
