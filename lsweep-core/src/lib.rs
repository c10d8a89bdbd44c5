pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod identity;
pub mod item;
pub mod ops;
pub mod pipeline;
pub mod selection;
pub mod stats;
pub mod store;

pub use engine::{DeletionScope, EngineStatus, Notifier, NullNotifier, SweepEngine};
pub use error::{Result, SweepError};
pub use filter::{FilterCriteria, FilterOutcome, RangeSpec, apply_filters};
pub use format::format_elapsed;
pub use identity::{MIN_ID_LEN, resolve, resolve_items};
pub use item::{ItemId, ListItem, RawItem};
pub use ops::{DeselectOutcome, SelectOutcome, deselect_all, invert, select_all};
pub use pipeline::{
    CancellationToken, Clock, DeleteMessage, DeletePipeline, DeleteProgress, DeleteSummary,
    ItemRemover, JobStatus, PipelineConfig, SystemClock, backoff_delay,
};
pub use selection::SelectionSet;
pub use stats::{SessionSnapshot, SessionStats};
pub use store::{MemoryStore, PersistedState, StateStore};
