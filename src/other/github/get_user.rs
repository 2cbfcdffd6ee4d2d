use reqwest::StatusCode;
use thiserror::Error as ThisError;
use tracing::{event, Level};
use types::entities::entry::Entry;

use crate::{GitHub, GithubReq};

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("User not found")]
  NotFound,
}

/// Get the full profile of a specific user.
///
/// # Errors
///
/// Will return any unhandled request errors, or `NotFound` for unknown handles.
pub async fn act(github: &GitHub, handle: &str) -> Result<Entry, super::Error<Error>> {
  Request { handle }.act(github).await
}

struct Request<'a> {
  handle: &'a str,
}
impl GithubReq for Request<'_> {
  type ReqOutput = Entry;
  type HandledError = Error;

  fn path(&self) -> String {
    format!("/users/{}", self.handle)
  }

  fn handle_status(status: StatusCode) -> Option<super::Error<Error>> {
    if status == StatusCode::NOT_FOUND {
      event!(Level::INFO, "Requested user does not exist.");
      Some(super::Error::Other(Error::NotFound))
    } else {
      None
    }
  }
}
