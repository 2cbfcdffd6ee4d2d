use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

pub type EntryId = u64;

/// A user record from the directory service.
///
/// Search results only carry the list-form fields (`id`, `login`,
/// `avatar_url`); the remaining ones are filled in by a detail fetch.
/// Two entries are the same entry when their ids match, whatever the rest of
/// their data says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
  pub id: EntryId,
  pub login: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub avatar_url: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bio: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub followers: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub following: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub public_repos: Option<u32>,
}
impl Entry {
  /// Builds a list-form entry, as returned by a search.
  #[must_use]
  pub fn listed(id: EntryId, login: impl Into<String>, avatar_url: impl Into<String>) -> Self {
    Self {
      id,
      login: login.into(),
      name: None,
      avatar_url: avatar_url.into(),
      bio: None,
      followers: None,
      following: None,
      public_repos: None,
    }
  }

  /// Path of this entry's profile view.
  #[must_use]
  pub fn profile_path(&self) -> String {
    format!("/user/{}", self.login)
  }
}
impl Hash for Entry {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}
impl PartialEq for Entry {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}
impl Eq for Entry {}

/// Response of the user search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
  pub items: Vec<Entry>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_is_the_id_alone() {
    let listed = Entry::listed(1, "octocat", "https://avatars.example/u/1");
    let mut detailed = listed.clone();
    detailed.name = Some("The Octocat".into());
    detailed.followers = Some(20);

    assert_eq!(listed, detailed);
    assert_ne!(listed, Entry::listed(2, "octocat", "https://avatars.example/u/1"));
  }

  #[test]
  fn list_form_entries_deserialize_without_detail_fields() {
    let json = r#"{"login":"octocat","id":583231,"avatar_url":"https://avatars.githubusercontent.com/u/583231?v=4","type":"User","score":1.0}"#;
    let entry: Entry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.id, 583_231);
    assert_eq!(entry.login, "octocat");
    assert!(entry.bio.is_none());
    assert!(entry.public_repos.is_none());
  }

  #[test]
  fn detail_form_entries_keep_null_bios_absent() {
    let json = r#"{"login":"torvalds","id":1024025,"avatar_url":"https://avatars.githubusercontent.com/u/1024025?v=4","name":"Linus Torvalds","bio":null,"public_repos":8,"followers":250000,"following":0}"#;
    let entry: Entry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.name.as_deref(), Some("Linus Torvalds"));
    assert_eq!(entry.bio, None);
    assert_eq!(entry.following, Some(0));

    let serialized = serde_json::to_string(&entry).unwrap();
    assert!(!serialized.contains("bio"));
  }

  #[test]
  fn profile_path_uses_the_login() {
    let entry = Entry::listed(1, "octocat", "");
    assert_eq!(entry.profile_path(), "/user/octocat");
  }
}
