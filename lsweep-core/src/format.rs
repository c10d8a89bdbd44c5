use std::time::Duration;

/// Format an elapsed duration into a compact human-readable string
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();

    if total_secs >= 3600 {
        format!("{}h {}m", total_secs / 3600, (total_secs % 3600) / 60)
    } else if total_secs >= 60 {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    } else if total_secs >= 10 {
        format!("{}s", total_secs)
    } else {
        format!("{:.1}s", elapsed.as_millis() as f64 / 1000.0)
    }
}
