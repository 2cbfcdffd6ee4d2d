use github::{search_users, Directory, Error};
use tokio::sync::{watch, Mutex, MutexGuard, Notify};
use tracing::{event, Level};
use types::entities::entry::Entry;
use utils::constants::MIN_QUERY_LENGTH;

use super::{LoadOutcome, SearchState, Status};

/// Fetches result pages for the current search session and accumulates them.
///
/// At most one page fetch is ever outstanding. The in-flight flag is the
/// guard of `in_flight`: it is taken before a request starts and released
/// when the fetch ends, whichever way it ends.
pub struct Pager<D> {
  directory: D,
  state: watch::Sender<SearchState>,
  in_flight: Mutex<()>,
  reset: Notify,
}
impl<D: Directory> Pager<D> {
  pub fn new(directory: D) -> Self {
    Self {
      directory,
      state: watch::Sender::new(SearchState::default()),
      in_flight: Mutex::new(()),
      reset: Notify::new(),
    }
  }

  /// Receiver marked as changed whenever the session state changes.
  #[must_use]
  pub fn subscribe(&self) -> watch::Receiver<SearchState> {
    self.state.subscribe()
  }

  #[must_use]
  pub fn snapshot(&self) -> SearchState {
    let state = self.state.borrow();
    state.clone()
  }

  #[must_use]
  pub fn is_loading(&self) -> bool {
    self.in_flight.try_lock().is_err()
  }

  /// Replaces the session with a fresh one for `query` and fetches its first
  /// page, unless the query is too short to be searched.
  ///
  /// A fetch still running for the previous session is cancelled.
  pub async fn start(&self, query: String) -> LoadOutcome {
    self.reset.notify_waiters();
    let guard = self.in_flight.lock().await;

    self.state.send_modify(|state| {
      let session = state.session.wrapping_add(1);
      *state = SearchState {
        query,
        session,
        ..SearchState::default()
      };
    });

    self.fetch(guard).await
  }

  /// Fetches the current page again and appends it. A no-op while another
  /// fetch is in flight.
  pub async fn load_more(&self) -> LoadOutcome {
    let Ok(guard) = self.in_flight.try_lock() else {
      event!(Level::DEBUG, "A fetch is already in flight, ignoring.");
      return LoadOutcome::Busy;
    };
    self.fetch(guard).await
  }

  /// The viewer got close to the end of the results: move to the next page
  /// and fetch it.
  ///
  /// Dropped while another fetch is in flight, without touching the page
  /// counter, so pages are never skipped.
  pub async fn proximity(&self) -> LoadOutcome {
    let Ok(guard) = self.in_flight.try_lock() else {
      event!(Level::DEBUG, "A fetch is already in flight, ignoring proximity.");
      return LoadOutcome::Busy;
    };
    if !self.is_searchable() {
      return LoadOutcome::Skipped;
    }

    self.state.send_modify(|state| state.page += 1);
    self.fetch(guard).await
  }

  fn is_searchable(&self) -> bool {
    let state = self.state.borrow();
    state.query.chars().count() >= MIN_QUERY_LENGTH
  }

  async fn fetch(&self, guard: MutexGuard<'_, ()>) -> LoadOutcome {
    let (query, page, session) = {
      let state = self.state.borrow();
      (state.query.clone(), state.page, state.session)
    };
    if query.chars().count() < MIN_QUERY_LENGTH {
      event!(Level::DEBUG, "Query {query:?} is too short, not searching.");
      return LoadOutcome::Skipped;
    }

    event!(Level::DEBUG, "Fetching page {page} for {query:?}.");
    let response = tokio::select! {
      response = self.directory.search_users(&query, page) => response,
      () = self.reset.notified() => {
        event!(Level::DEBUG, "Search for {query:?} was superseded, cancelling.");
        return LoadOutcome::Cancelled;
      }
    };

    let outcome = self.apply(session, response);
    drop(guard);
    outcome
  }

  /// Applies a page response to the session it was fetched for. A partial
  /// page is never applied: either every entry is appended or none is.
  fn apply(
    &self,
    session: u64,
    response: Result<Vec<Entry>, Error<search_users::Error>>,
  ) -> LoadOutcome {
    let mut outcome = LoadOutcome::Stale;
    self.state.send_if_modified(|state| {
      if state.session != session {
        return false;
      }

      outcome = match response {
        Ok(entries) if entries.is_empty() => {
          event!(Level::INFO, "No more users for {:?}.", state.query);
          state.status = Some(Status::NoMoreResults);
          LoadOutcome::Status(Status::NoMoreResults)
        }
        Ok(entries) => {
          let appended = entries.len();
          event!(
            Level::DEBUG,
            "Page {} of {:?} brought {appended} users.",
            state.page,
            state.query
          );
          state.results.extend(entries);
          state.status = None;
          LoadOutcome::Appended(appended)
        }
        Err(Error::QuotaExhausted) => {
          event!(Level::WARN, "Rate limit hit while searching {:?}.", state.query);
          state.status = Some(Status::QuotaExhausted);
          LoadOutcome::Status(Status::QuotaExhausted)
        }
        Err(e) => {
          event!(Level::ERROR, "Error fetching users: {e}");
          state.status = Some(Status::FetchFailed);
          LoadOutcome::Status(Status::FetchFailed)
        }
      };
      true
    });

    if outcome == LoadOutcome::Stale {
      event!(Level::DEBUG, "Discarded a page fetched for an older session.");
    }
    outcome
  }
}
