use crate::item::ItemId;

/// Lifecycle of a deletion job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Running,
    Cancelled,
    Completed,
}

/// Progress update during a running deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteProgress {
    /// Items processed so far (deleted or permanently failed)
    pub completed: usize,
    /// Items in the job
    pub total: usize,
}

impl DeleteProgress {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Terminal accounting for a finished or cancelled job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Items successfully removed
    pub deleted: usize,
    /// Items that exhausted their retries
    pub errors: usize,
    /// Items never attempted (non-zero only after cancellation)
    pub remaining: usize,
    /// Wall time the job ran for
    pub elapsed_ms: u64,
}

/// Message sent from the deletion pipeline to the host
#[derive(Debug, Clone)]
pub enum DeleteMessage {
    /// Job entered the running state
    Started { total: usize },
    /// One item was removed and verified gone
    ItemDeleted(ItemId),
    /// One item exhausted its retries and was recorded as a permanent error
    ItemFailed { id: ItemId, attempts: u32 },
    /// Progress update, emitted after each processed item
    Progress(DeleteProgress),
    /// Job ran to the end of its list
    Completed(DeleteSummary),
    /// Job was cancelled at an item boundary
    Cancelled(DeleteSummary),
}
