use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use super::progress::{DeleteMessage, DeleteProgress, DeleteSummary};
use crate::item::ItemId;

/// Deletion pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retries per item after the first failed attempt
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry
    pub base_delay: Duration,
    /// Ceiling for the backoff delay
    pub max_delay: Duration,
    /// Wait between triggering a removal and verifying the item is gone
    pub settle_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(2000),
            max_delay: Duration::from_millis(10000),
            settle_delay: Duration::from_millis(1000),
        }
    }
}

/// Backoff before retry number `retry` (0-based): `base * 2^retry`, capped
pub fn backoff_delay(config: &PipelineConfig, retry: u32) -> Duration {
    config
        .base_delay
        .saturating_mul(2u32.saturating_pow(retry))
        .min(config.max_delay)
}

/// Cancellation token for stopping a running job at the next item boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Time source for the pipeline's settle and backoff waits. Tests inject a
/// fake clock to assert exact delays without real waiting.
pub trait Clock: Send {
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// The host-side capability to remove one item and observe the result.
pub trait ItemRemover: Send {
    /// Trigger the host's removal control for the item. Returns false when
    /// the control cannot be located or invoked.
    fn trigger_remove(&mut self, id: &ItemId) -> bool;

    /// Whether the item still renders on the host page
    fn is_rendered(&mut self, id: &ItemId) -> bool;
}

/// Outcome of processing a single identifier
enum ItemOutcome {
    Deleted,
    /// Retries exhausted; carries the total attempt count
    Failed(u32),
    /// Cancellation observed before a retry attempt
    Interrupted,
}

/// Sequential deletion pipeline.
///
/// Consumes an ordered list of identifiers and removes them one at a time:
/// trigger the host's control, wait the settle delay, verify absence, retry
/// transient failures with exponential backoff. Exactly one job runs at a
/// time; the engine enforces that with its re-entrancy guard.
pub struct DeletePipeline {
    config: PipelineConfig,
    cancel: CancellationToken,
}

impl DeletePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Run the job on a background thread.
    /// Returns a receiver for progress messages and the join handle.
    pub fn run<R, C>(
        self,
        ids: Vec<ItemId>,
        remover: R,
        clock: C,
    ) -> (Receiver<DeleteMessage>, JoinHandle<DeleteSummary>)
    where
        R: ItemRemover + 'static,
        C: Clock + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = std::thread::spawn(move || {
            let mut remover = remover;
            self.run_sync(&ids, &mut remover, &clock, &tx)
        });

        (rx, handle)
    }

    /// Synchronous job loop (runs in thread)
    fn run_sync<R: ItemRemover, C: Clock>(
        self,
        ids: &[ItemId],
        remover: &mut R,
        clock: &C,
        tx: &Sender<DeleteMessage>,
    ) -> DeleteSummary {
        let total = ids.len();
        let started = Instant::now();
        let _ = tx.send(DeleteMessage::Started { total });

        let mut deleted = 0;
        let mut errors = 0;

        for (index, id) in ids.iter().enumerate() {
            // Cancellation only takes effect at item boundaries; an in-flight
            // action and its settle wait always complete.
            if self.cancel.is_cancelled() {
                let summary = DeleteSummary {
                    deleted,
                    errors,
                    remaining: total - index,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
                let _ = tx.send(DeleteMessage::Cancelled(summary.clone()));
                return summary;
            }

            match self.delete_item(id, remover, clock) {
                ItemOutcome::Deleted => {
                    deleted += 1;
                    let _ = tx.send(DeleteMessage::ItemDeleted(id.clone()));
                }
                ItemOutcome::Failed(attempts) => {
                    // No item blocks the batch indefinitely; record and move on
                    errors += 1;
                    tracing::warn!(%id, attempts, "item removal failed permanently");
                    let _ = tx.send(DeleteMessage::ItemFailed {
                        id: id.clone(),
                        attempts,
                    });
                }
                ItemOutcome::Interrupted => {
                    let summary = DeleteSummary {
                        deleted,
                        errors,
                        remaining: total - index,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    };
                    let _ = tx.send(DeleteMessage::Cancelled(summary.clone()));
                    return summary;
                }
            }

            let _ = tx.send(DeleteMessage::Progress(DeleteProgress {
                completed: index + 1,
                total,
            }));
        }

        let summary = DeleteSummary {
            deleted,
            errors,
            remaining: 0,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        let _ = tx.send(DeleteMessage::Completed(summary.clone()));
        summary
    }

    /// Remove one item, retrying transient failures with backoff
    fn delete_item<R: ItemRemover, C: Clock>(
        &self,
        id: &ItemId,
        remover: &mut R,
        clock: &C,
    ) -> ItemOutcome {
        let mut retries = 0;

        loop {
            if self.attempt_once(id, remover, clock) {
                return ItemOutcome::Deleted;
            }

            if retries >= self.config.max_retries {
                return ItemOutcome::Failed(retries + 1);
            }

            let delay = backoff_delay(&self.config, retries);
            tracing::debug!(%id, retry = retries + 1, ?delay, "removal failed, backing off");
            clock.sleep(delay);
            retries += 1;

            // A retry is a new action; honor a cancel that arrived meanwhile
            if self.cancel.is_cancelled() {
                return ItemOutcome::Interrupted;
            }
        }
    }

    /// One removal attempt: trigger, settle, verify absence
    fn attempt_once<R: ItemRemover, C: Clock>(
        &self,
        id: &ItemId,
        remover: &mut R,
        clock: &C,
    ) -> bool {
        if !remover.trigger_remove(id) {
            return false;
        }

        clock.sleep(self.config.settle_delay);
        !remover.is_rendered(id)
    }
}
