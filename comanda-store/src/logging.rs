//! Logging setup for embedding shells

/// Initialize the tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops (useful in tests).
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");

    tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init()
        .ok();
}
