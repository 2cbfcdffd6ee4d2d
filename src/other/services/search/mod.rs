mod controller;
mod pager;

pub use controller::QueryController;
pub use pager::Pager;

use std::fmt;

use types::entities::entry::Entry;

/// State of the current search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
  pub query: String,
  /// Last page requested for this session, starting at 1.
  pub page: u32,
  /// Every entry fetched in this session, in page order.
  pub results: Vec<Entry>,
  pub status: Option<Status>,
  /// Incremented on every reset; fetches belonging to an older session are discarded.
  pub session: u64,
}
impl Default for SearchState {
  fn default() -> Self {
    Self {
      query: String::new(),
      page: 1,
      results: Vec::new(),
      status: None,
      session: 0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  NoMoreResults,
  QuotaExhausted,
  FetchFailed,
}
impl Status {
  /// Running out of results and hitting the rate limit read the same to the user.
  #[must_use]
  pub const fn message(self) -> &'static str {
    match self {
      Self::NoMoreResults | Self::QuotaExhausted => "No more users to load or rate limit hit",
      Self::FetchFailed => "Failed to fetch users.",
    }
  }
}
impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// What a pager operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// This many entries were appended.
  Appended(usize),
  /// Nothing was appended; the status was set instead.
  Status(Status),
  /// Another fetch was in flight, so nothing happened.
  Busy,
  /// The query is too short to be searched.
  Skipped,
  /// A reset cancelled the fetch before it completed.
  Cancelled,
  /// The fetch completed for a session that is no longer current.
  Stale,
}
