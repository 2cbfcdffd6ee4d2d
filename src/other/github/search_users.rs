use reqwest::StatusCode;
use thiserror::Error as ThisError;
use types::entities::entry::{Entry, SearchPage};
use utils::constants::RESULTS_PER_PAGE;

use crate::{GitHub, GithubReq};

#[derive(ThisError, Debug)]
pub enum Error {}

/// Fetches one page of users matching `query`, `RESULTS_PER_PAGE` at a time.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(github: &GitHub, query: &str, page: u32) -> Result<Vec<Entry>, super::Error<Error>> {
  let page = Request { query, page }.act(github).await?;
  Ok(page.items)
}

struct Request<'a> {
  query: &'a str,
  page: u32,
}
impl GithubReq for Request<'_> {
  type ReqOutput = SearchPage;
  type HandledError = Error;

  fn path(&self) -> String {
    "/search/users".to_string()
  }

  fn query(&self) -> Vec<(&'static str, String)> {
    vec![
      ("q", self.query.to_string()),
      ("page", self.page.to_string()),
      ("per_page", RESULTS_PER_PAGE.to_string()),
    ]
  }

  fn handle_status(_: StatusCode) -> Option<super::Error<Error>> {
    // No statuses are specific to this request
    None
  }
}
