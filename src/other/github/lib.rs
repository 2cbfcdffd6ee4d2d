use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::{
  header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT},
  Client, StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use tokio::{sync::Mutex, time::sleep};
use tracing::{event, Level};
use types::entities::entry::Entry;
use utils::constants::MINIMUM_REQUEST_DELAY_MS;

pub mod get_user;
pub mod search_users;

#[derive(ThisError, Debug)]
pub enum Error<Other> {
  #[error("HTTP error! status: {0}")]
  Http(StatusCode),
  #[error("Failed to reach the directory service")]
  Transport,
  #[error("Rate limit exceeded")]
  QuotaExhausted,
  #[error("Invalid directory data")]
  InvalidData,
  #[error(transparent)]
  Other(#[from] Other),
}

#[derive(ThisError, Debug)]
pub enum ClientError {
  #[error("Invalid token value")]
  InvalidToken(#[from] InvalidHeaderValue),
  #[error("Failed to build HTTP client: {0}")]
  Build(#[from] reqwest::Error),
}

/// Read-only access to the user directory.
///
/// Implemented by [`GitHub`]; anything else implementing it (a recorded
/// session, a test double) can stand in for the remote service.
pub trait Directory: Send + Sync + 'static {
  fn search_users(
    &self,
    query: &str,
    page: u32,
  ) -> impl Future<Output = Result<Vec<Entry>, Error<search_users::Error>>> + Send;

  fn get_user(
    &self,
    handle: &str,
  ) -> impl Future<Output = Result<Entry, Error<get_user::Error>>> + Send;
}

impl<D: Directory> Directory for Arc<D> {
  fn search_users(
    &self,
    query: &str,
    page: u32,
  ) -> impl Future<Output = Result<Vec<Entry>, Error<search_users::Error>>> + Send {
    (**self).search_users(query, page)
  }

  fn get_user(
    &self,
    handle: &str,
  ) -> impl Future<Output = Result<Entry, Error<get_user::Error>>> + Send {
    (**self).get_user(handle)
  }
}

pub struct GitHub {
  client: Client,
  base_url: Box<str>,
  last_action: Mutex<DateTime<Utc>>,
}
impl GitHub {
  /// Creates a client with the headers the API expects, plus a bearer token
  /// when one is given.
  ///
  /// # Errors
  ///
  /// When the token is not a valid header value or the client fails to build.
  pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("github-directory-client"));
    headers.insert(
      ACCEPT,
      HeaderValue::from_static("application/vnd.github.v3+json"),
    );
    if let Some(token) = token {
      let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
      value.set_sensitive(true);
      headers.insert(AUTHORIZATION, value);
    }

    let client = Client::builder().default_headers(headers).build()?;
    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').into(),
      last_action: Mutex::new(DateTime::<Utc>::UNIX_EPOCH),
    })
  }

  /// Creates a client from `GITHUB_API_URL` and `GITHUB_TOKEN`.
  ///
  /// # Errors
  ///
  /// Same as [`GitHub::new`].
  pub fn from_env() -> Result<Self, ClientError> {
    Self::new(*environment::GITHUB_API_URL, *environment::GITHUB_TOKEN)
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}{path}", self.base_url)
  }

  /// Keeps consecutive requests at least `MINIMUM_REQUEST_DELAY_MS` apart.
  async fn minimum_delay(&self) {
    let mut last_action = self.last_action.lock().await;
    let current = Utc::now();
    let elapsed: u64 = current
      .signed_duration_since(*last_action)
      .num_milliseconds()
      .try_into()
      .unwrap_or(0);
    if elapsed < MINIMUM_REQUEST_DELAY_MS {
      sleep(Duration::from_millis(MINIMUM_REQUEST_DELAY_MS - elapsed)).await;
    }
    *last_action = Utc::now();
  }
}
impl Directory for GitHub {
  fn search_users(
    &self,
    query: &str,
    page: u32,
  ) -> impl Future<Output = Result<Vec<Entry>, Error<search_users::Error>>> + Send {
    search_users::act(self, query, page)
  }

  fn get_user(
    &self,
    handle: &str,
  ) -> impl Future<Output = Result<Entry, Error<get_user::Error>>> + Send {
    get_user::act(self, handle)
  }
}

trait GithubReq {
  type ReqOutput: DeserializeOwned;
  type HandledError: std::error::Error;

  fn path(&self) -> String;
  fn query(&self) -> Vec<(&'static str, String)> {
    Vec::new()
  }
  /// Maps endpoint specific statuses. Quota and success are handled before this.
  fn handle_status(status: StatusCode) -> Option<Error<Self::HandledError>>;

  async fn act(self, github: &GitHub) -> Result<Self::ReqOutput, Error<Self::HandledError>>
  where
    Self: Sized,
  {
    github.minimum_delay().await;

    let url = github.endpoint(&self.path());
    let response = github
      .client
      .get(&url)
      .query(&self.query())
      .send()
      .await
      .map_err(|e| {
        event!(Level::WARN, "Failed to issue request, API Error: {e}");
        Error::Transport
      })?;

    check_status(response.status(), Self::handle_status)?;

    let body = response.text().await.map_err(|e| {
      event!(Level::WARN, "Failed to read response body: {e}");
      Error::Transport
    })?;
    serde_json::from_str(&body).map_err(|e| {
      event!(Level::WARN, "Failed to decode response from {url}: {e}");
      Error::InvalidData
    })
  }
}

/// 403 is always read as quota exhaustion. Other non-success statuses go
/// through the endpoint's own handler first and end up as a plain HTTP error.
fn check_status<Other>(
  status: StatusCode,
  handle_status: impl FnOnce(StatusCode) -> Option<Error<Other>>,
) -> Result<(), Error<Other>> {
  if status.is_success() {
    return Ok(());
  }
  if status == StatusCode::FORBIDDEN {
    event!(Level::WARN, "Rate limit exceeded");
    return Err(Error::QuotaExhausted);
  }
  Err(handle_status(status).unwrap_or_else(|| {
    event!(Level::WARN, "Request failed. Status Code: {status}.");
    Error::Http(status)
  }))
}
