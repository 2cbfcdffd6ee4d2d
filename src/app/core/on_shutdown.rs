use tokio::signal;
use tracing::{event, Level};

/// Resolves once the process is asked to stop.
pub async fn with_graceful_shutdown() {
  shutdown_signal().await;
  event!(Level::INFO, "Shutting down! Pending searches are dropped.");
}

/// # Panics
///
/// Will panic if fails to install any of the signal handlers.
async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c()
      .await
      .unwrap_or_else(|e| panic!("Failed to install Ctrl+C handler! {e}"));
  };

  #[cfg(unix)]
  let term_or_int = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .unwrap_or_else(|e| panic!("Failed to install SIGTERM handler! {e}"))
      .recv()
      .await;
  };

  #[cfg(windows)]
  let term_or_int = async {
    signal::windows::ctrl_close()
      .unwrap_or_else(|e| panic!("Failed to install Windows SIGINT handler! {e}"))
      .recv()
      .await;
  };

  tokio::select! {
    () = ctrl_c => {},
    () = term_or_int => {},
  }
}
