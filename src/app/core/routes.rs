use std::{fmt, str::FromStr};

use anyhow::bail;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref PROFILE_ROUTE: Regex = Regex::new(r"^/user/([A-Za-z0-9-]+)/?$")
    .unwrap_or_else(|e| panic!("Invalid profile route pattern! {e}"));
  static ref HANDLE: Regex =
    Regex::new(r"^[A-Za-z0-9-]+$").unwrap_or_else(|e| panic!("Invalid handle pattern! {e}"));
}

/// Views reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  /// `/`
  Search,
  /// `/user/{handle}`
  Profile(String),
  /// `/favorites`
  Favorites,
}
impl Route {
  /// Profile route for `handle`.
  ///
  /// # Errors
  ///
  /// When `handle` is not a valid user handle.
  pub fn profile(handle: &str) -> anyhow::Result<Self> {
    if !HANDLE.is_match(handle) {
      bail!("{handle:?} is not a valid user handle");
    }
    Ok(Self::Profile(handle.to_string()))
  }
}
impl FromStr for Route {
  type Err = anyhow::Error;

  fn from_str(path: &str) -> Result<Self, Self::Err> {
    match path {
      "/" | "" => Ok(Self::Search),
      "/favorites" | "/favorites/" => Ok(Self::Favorites),
      _ => {
        let Some(captures) = PROFILE_ROUTE.captures(path) else {
          bail!("No view lives at {path:?}");
        };
        Ok(Self::Profile(captures[1].to_string()))
      }
    }
  }
}
impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Search => f.write_str("/"),
      Self::Profile(handle) => write!(f, "/user/{handle}"),
      Self::Favorites => f.write_str("/favorites"),
    }
  }
}
