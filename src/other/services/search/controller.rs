use std::{sync::Arc, time::Duration};

use github::Directory;
use tokio::{sync::Mutex, task::JoinHandle, time::sleep};
use tracing::{event, Level};
use utils::constants::DEBOUNCE_DELAY_MS;

use super::{LoadOutcome, Pager};

/// Owns the search text and debounces it into pager sessions.
pub struct QueryController<D> {
  pager: Arc<Pager<D>>,
  delay: Duration,
  pending: Mutex<Option<JoinHandle<LoadOutcome>>>,
}
impl<D: Directory> QueryController<D> {
  pub fn new(pager: Arc<Pager<D>>) -> Self {
    Self::with_delay(pager, Duration::from_millis(DEBOUNCE_DELAY_MS))
  }

  pub fn with_delay(pager: Arc<Pager<D>>, delay: Duration) -> Self {
    Self {
      pager,
      delay,
      pending: Mutex::new(None),
    }
  }

  #[must_use]
  pub const fn pager(&self) -> &Arc<Pager<D>> {
    &self.pager
  }

  /// The search text changed.
  ///
  /// Whatever the previous input scheduled is cancelled, be it still waiting
  /// out the quiet period or already searching. Once `delay` passes without
  /// further input, a new session starts for `text`.
  pub async fn input(&self, text: impl Into<String> + Send) {
    let text = text.into();
    let mut pending = self.pending.lock().await;
    if let Some(previous) = pending.take() {
      previous.abort();
    }

    event!(Level::TRACE, "Search text is now {text:?}.");
    let pager = Arc::clone(&self.pager);
    let delay = self.delay;
    *pending = Some(tokio::spawn(async move {
      sleep(delay).await;
      pager.start(text).await
    }));
  }

  /// Waits for the search scheduled by the last input, if any.
  ///
  /// Returns `None` when nothing was pending or it got cancelled.
  pub async fn settle(&self) -> Option<LoadOutcome> {
    let handle = self.pending.lock().await.take()?;
    handle.await.ok()
  }
}
impl<D> Drop for QueryController<D> {
  fn drop(&mut self) {
    if let Some(pending) = self.pending.get_mut().take() {
      pending.abort();
    }
  }
}
