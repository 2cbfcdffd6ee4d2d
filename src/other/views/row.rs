use std::fmt;

use types::entities::entry::Entry;

use crate::favorite_marker;

/// Compact list form: avatar, handle, favorite marker and a link to the profile.
pub struct UserRow<'a> {
  user: &'a Entry,
  is_favorite: bool,
}
impl<'a> UserRow<'a> {
  #[must_use]
  pub const fn new(user: &'a Entry, is_favorite: bool) -> Self {
    Self { user, is_favorite }
  }

  /// Route of the profile this row navigates to.
  #[must_use]
  pub fn link(&self) -> String {
    self.user.profile_path()
  }

  /// The favorite marker was clicked.
  pub fn toggle<R>(&self, on_toggle: impl FnOnce(&'a Entry) -> R) -> R {
    on_toggle(self.user)
  }
}
impl fmt::Display for UserRow<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} @{}  <{}>  -> {}",
      favorite_marker(self.is_favorite),
      self.user.login,
      self.user.avatar_url,
      self.link()
    )
  }
}
