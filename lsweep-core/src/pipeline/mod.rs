mod progress;
mod runner;

pub use progress::{DeleteMessage, DeleteProgress, DeleteSummary, JobStatus};
pub use runner::{
    CancellationToken, Clock, DeletePipeline, ItemRemover, PipelineConfig, SystemClock,
    backoff_delay,
};
