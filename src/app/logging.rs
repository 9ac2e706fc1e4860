use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable holding the log level, such as `debug`.
pub const LOG_LEVEL_VAR: &str = "MAZESTEP_LOG";
/// Directory the log file is written to.
pub const LOG_DIR: &str = "logs";
/// Name of the log file inside [`LOG_DIR`].
pub const LOG_FILE: &str = "mazestep.log";

/// Level named by `raw`, or `INFO` when it is missing or unknown.
fn log_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(Level::INFO)
}

/// Send logs to `logs/mazestep.log` through a background writer, since the terminal is busy
/// drawing. Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_logging() -> WorkerGuard {
    let level = log_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    let appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
    if installed.is_ok() {
        tracing::info!("[logging] writing {} logs to {}/{}", level, LOG_DIR, LOG_FILE);
    }
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(None), Level::INFO);
        assert_eq!(log_level(Some("debug")), Level::DEBUG);
        assert_eq!(log_level(Some(" TRACE ")), Level::TRACE);
        assert_eq!(log_level(Some("loud")), Level::INFO);
    }
}
