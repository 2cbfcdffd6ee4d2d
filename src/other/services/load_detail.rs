use github::{get_user, Directory, Error};
use tracing::{event, Level};
use types::entities::entry::Entry;

pub static DETAIL_FAILURE: &str = "Failed to fetch user details.";

/// Progress of a profile view's detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
  /// Nothing arrived yet. Renders as nothing at all.
  Pending,
  Loaded(Entry),
  Failed,
}
impl Detail {
  /// The error line shown instead of the card, if any.
  #[must_use]
  pub const fn error(&self) -> Option<&'static str> {
    match self {
      Self::Failed => Some(DETAIL_FAILURE),
      Self::Pending | Self::Loaded(_) => None,
    }
  }
}

/// Fetches the full entry behind `handle`, once.
pub async fn act<D: Directory>(directory: &D, handle: &str) -> Detail {
  match directory.get_user(handle).await {
    Ok(entry) => Detail::Loaded(entry),
    Err(Error::Other(get_user::Error::NotFound)) => {
      event!(Level::INFO, "Fetching user details failed: @{handle} does not exist.");
      Detail::Failed
    }
    Err(e) => {
      event!(Level::ERROR, "Fetching user details failed: {e}");
      Detail::Failed
    }
  }
}
