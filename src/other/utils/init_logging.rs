use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use environment::{CONSOLE_LOG_SEVERITY, LOG_DIRECTORY};

/// # Panics
///
/// When logging fails to initialize.
pub async fn init_logging() -> (WorkerGuard, WorkerGuard) {
  color_eyre::install().unwrap_or_default();

  let canonical = super::canonicalize_unexistent(*LOG_DIRECTORY)
    .unwrap_or_else(|| panic!("Failed to canonicalize path!"));
  tokio::fs::create_dir_all(&canonical)
    .await
    .unwrap_or_else(|e| panic!("Failed to create canonical directory: {e}. Path: {canonical:?}"));

  let file_appender = tracing_appender::rolling::daily(canonical, "GithubDirectory.log");
  let (non_blocking_file, guard0) = tracing_appender::non_blocking(file_appender);
  // Logs go to stderr so they never interleave with the rendered views on stdout
  let (non_blocking_stderr, guard1) = tracing_appender::non_blocking(std::io::stderr());

  let file_log = tracing_subscriber::fmt::layer()
    .with_ansi(false)
    .with_writer(non_blocking_file);
  let stderr_log = tracing_subscriber::fmt::layer()
    .pretty()
    .with_writer(non_blocking_stderr);

  let layered = stderr_log
    .and_then(file_log)
    .with_filter(*CONSOLE_LOG_SEVERITY);

  tracing_subscriber::registry().with(layered).init();

  (guard0, guard1)
}
