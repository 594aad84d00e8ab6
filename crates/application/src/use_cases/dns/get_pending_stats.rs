use crate::ports::PendingQueryTable;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingStats {
    pub in_flight: usize,
}

pub struct GetPendingStatsUseCase {
    pending: Arc<dyn PendingQueryTable>,
}

impl GetPendingStatsUseCase {
    pub fn new(pending: Arc<dyn PendingQueryTable>) -> Self {
        Self { pending }
    }

    pub fn execute(&self) -> PendingStats {
        PendingStats {
            in_flight: self.pending.len(),
        }
    }
}
