use std::fmt;

use types::entities::entry::Entry;

use crate::{favorite_label, favorite_marker};

/// Expanded form shown on a profile: avatar, name, handle, bio, counters and
/// the favorite marker.
pub struct UserCard<'a> {
  user: &'a Entry,
  is_favorite: bool,
}
impl<'a> UserCard<'a> {
  #[must_use]
  pub const fn new(user: &'a Entry, is_favorite: bool) -> Self {
    Self { user, is_favorite }
  }

  /// The favorite marker was clicked.
  pub fn toggle<R>(&self, on_toggle: impl FnOnce(&'a Entry) -> R) -> R {
    on_toggle(self.user)
  }
}
impl fmt::Display for UserCard<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let user = self.user;
    writeln!(f, "[{}]", user.avatar_url)?;
    if let Some(name) = &user.name {
      writeln!(f, "{name}")?;
    }
    writeln!(f, "@{}", user.login)?;
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
      writeln!(f, "{bio}")?;
    }
    writeln!(
      f,
      "{} FOLLOWERS  {} FOLLOWING  {} REPOS",
      counter(user.followers),
      counter(user.following),
      counter(user.public_repos)
    )?;
    write!(
      f,
      "{} {}",
      favorite_marker(self.is_favorite),
      favorite_label(self.is_favorite)
    )
  }
}

fn counter(value: Option<u32>) -> String {
  value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn octocat() -> Entry {
    Entry {
      name: Some("The Octocat".into()),
      bio: Some("Mona's friend".into()),
      followers: Some(9000),
      following: Some(9),
      public_repos: Some(8),
      ..Entry::listed(583_231, "octocat", "https://avatars.example/u/583231")
    }
  }

  #[test]
  fn renders_every_detail_field() {
    let user = octocat();

    assert_eq!(
      UserCard::new(&user, false).to_string(),
      "[https://avatars.example/u/583231]\n\
       The Octocat\n\
       @octocat\n\
       Mona's friend\n\
       9000 FOLLOWERS  9 FOLLOWING  8 REPOS\n\
       ☆ Add to Favorites"
    );
  }

  #[test]
  fn missing_fields_are_skipped_or_dashed() {
    let user = Entry::listed(1, "ghost", "https://avatars.example/u/1");

    let card = UserCard::new(&user, true).to_string();

    assert_eq!(
      card,
      "[https://avatars.example/u/1]\n@ghost\n- FOLLOWERS  - FOLLOWING  - REPOS\n★ Remove from Favorites"
    );
  }

  #[test]
  fn toggle_hands_the_entry_to_the_callback() {
    let user = octocat();
    let mut clicked = Vec::new();

    UserCard::new(&user, true).toggle(|e| clicked.push(e.login.clone()));

    assert_eq!(clicked, ["octocat"]);
  }
}
