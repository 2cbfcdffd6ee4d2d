use std::collections::HashSet;

use environment::STORAGE_DIRECTORY;
use lazy_static::lazy_static;
use thiserror::Error as ThisError;
use tokio::sync::watch;
use tracing::{event, Level};
use types::entities::entry::{Entry, EntryId};
use utils::constants::FAVORITES_KEY;

use crate::{FileStore, KeyValueStore, KvError};

lazy_static! {
  pub static ref FAVORITES: Favorites<FileStore> =
    Favorites::load(FileStore::new(*STORAGE_DIRECTORY));
}

#[derive(ThisError, Debug)]
pub enum FavoritesError {
  #[error("Failed to serialize favorites: {0}")]
  Serialize(#[from] serde_json::Error),
  #[error(transparent)]
  Storage(#[from] KvError),
}

/// The set of entries the user marked, persisted under `FAVORITES_KEY`.
///
/// One instance is shared by every view. Views call [`Favorites::subscribe`]
/// to hear about toggles made elsewhere instead of keeping their own copy.
pub struct Favorites<S> {
  storage: S,
  entries: watch::Sender<Vec<Entry>>,
}
impl<S: KeyValueStore> Favorites<S> {
  /// Rehydrates the set from `storage`.
  ///
  /// A missing key is an empty set. Unreadable or unparseable data is also
  /// loaded as an empty set; it stays on disk until the next toggle
  /// overwrites it.
  pub fn load(storage: S) -> Self {
    let entries = match storage.get(FAVORITES_KEY) {
      Ok(Some(text)) => parse(&text),
      Ok(None) => Vec::new(),
      Err(e) => {
        event!(Level::WARN, "Failed to read favorites, starting empty: {e}");
        Vec::new()
      }
    };
    event!(Level::DEBUG, "Loaded {} favorites.", entries.len());

    Self {
      storage,
      entries: watch::Sender::new(entries),
    }
  }

  /// Removes the entry sharing `entry`'s id, or appends `entry` when there is
  /// none. The new set is written to storage before this returns.
  ///
  /// Returns whether the entry is a favorite afterwards.
  ///
  /// # Errors
  ///
  /// When the set cannot be serialized or written. The set is left as it was.
  pub fn toggle(&self, entry: &Entry) -> Result<bool, FavoritesError> {
    let mut outcome = Ok(false);
    self.entries.send_if_modified(|entries| {
      let mut updated = entries.clone();
      let is_favorite = match updated.iter().position(|e| e.id == entry.id) {
        Some(index) => {
          updated.remove(index);
          false
        }
        None => {
          updated.push(entry.clone());
          true
        }
      };

      match self.persist(&updated) {
        Ok(()) => {
          *entries = updated;
          outcome = Ok(is_favorite);
          true
        }
        Err(e) => {
          outcome = Err(e);
          false
        }
      }
    });

    match &outcome {
      Ok(true) => event!(Level::INFO, "Added @{} to favorites.", entry.login),
      Ok(false) => event!(Level::INFO, "Removed @{} from favorites.", entry.login),
      Err(e) => event!(Level::ERROR, "Failed to save favorites: {e}"),
    }
    outcome
  }

  #[must_use]
  pub fn is_favorite(&self, id: EntryId) -> bool {
    let entries = self.entries.borrow();
    entries.iter().any(|e| e.id == id)
  }

  /// Snapshot of the current set, in insertion order.
  #[must_use]
  pub fn entries(&self) -> Vec<Entry> {
    let entries = self.entries.borrow();
    entries.clone()
  }

  /// Receiver marked as changed after every successful toggle.
  #[must_use]
  pub fn subscribe(&self) -> watch::Receiver<Vec<Entry>> {
    self.entries.subscribe()
  }

  fn persist(&self, entries: &[Entry]) -> Result<(), FavoritesError> {
    let serialized = serde_json::to_string(entries)?;
    self.storage.set(FAVORITES_KEY, &serialized)?;
    Ok(())
  }
}

fn parse(text: &str) -> Vec<Entry> {
  match serde_json::from_str::<Vec<Entry>>(text) {
    Ok(mut entries) => {
      let mut seen = HashSet::new();
      entries.retain(|e| seen.insert(e.id));
      entries
    }
    Err(e) => {
      event!(Level::WARN, "Persisted favorites are corrupt, starting empty: {e}");
      Vec::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io;

  use super::*;
  use crate::{Loadable, MemoryStore};

  fn user(id: EntryId, login: &str) -> Entry {
    Entry::listed(id, login, format!("https://avatars.example/u/{id}"))
  }

  fn persisted<S: KeyValueStore>(favorites: &Favorites<S>) -> Option<String> {
    favorites.storage.get(FAVORITES_KEY).unwrap()
  }

  struct ReadOnlyStore;
  impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _: &str) -> Loadable<String> {
      Ok(None)
    }

    fn set(&self, _: &str, _: &str) -> Result<(), KvError> {
      Err(KvError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }
  }

  #[test]
  fn missing_or_corrupt_data_loads_empty() {
    assert!(Favorites::load(MemoryStore::new()).entries().is_empty());
    assert!(Favorites::load(MemoryStore::with(FAVORITES_KEY, "{not json")).entries().is_empty());
  }

  #[test]
  fn duplicated_ids_collapse_on_load() {
    let text = r#"[{"id":1,"login":"a","avatar_url":""},{"id":1,"login":"b","avatar_url":""},{"id":2,"login":"c","avatar_url":""}]"#;
    let favorites = Favorites::load(MemoryStore::with(FAVORITES_KEY, text));

    let logins: Vec<_> = favorites.entries().into_iter().map(|e| e.login).collect();
    assert_eq!(logins, ["a", "c"]);
  }

  #[test]
  fn toggle_adds_then_removes_and_persists_each_time() {
    let favorites = Favorites::load(MemoryStore::new());
    let octocat = user(1, "octocat");

    assert!(favorites.toggle(&octocat).unwrap());
    assert!(favorites.is_favorite(1));
    let saved: Vec<Entry> = serde_json::from_str(&persisted(&favorites).unwrap()).unwrap();
    assert_eq!(saved, [octocat.clone()]);

    assert!(!favorites.toggle(&octocat).unwrap());
    assert!(!favorites.is_favorite(1));
    assert_eq!(persisted(&favorites).as_deref(), Some("[]"));
  }

  #[test]
  fn toggling_twice_restores_set_and_serialization() {
    let favorites = Favorites::load(MemoryStore::new());
    favorites.toggle(&user(1, "a")).unwrap();
    favorites.toggle(&user(2, "b")).unwrap();
    let before_entries = favorites.entries();
    let before_text = persisted(&favorites);

    let newcomer = user(3, "c");
    favorites.toggle(&newcomer).unwrap();
    favorites.toggle(&newcomer).unwrap();

    assert_eq!(favorites.entries(), before_entries);
    assert_eq!(persisted(&favorites), before_text);
  }

  #[test]
  fn ids_stay_unique_for_any_toggle_sequence() {
    let favorites = Favorites::load(MemoryStore::new());
    let ids = [1, 2, 1, 3, 2, 2, 4, 1, 3, 3, 5, 4];

    for (step, id) in ids.iter().enumerate() {
      // Same id under a different login is still the same entry
      favorites.toggle(&user(*id, &format!("login{step}"))).unwrap();

      let entries = favorites.entries();
      let unique: HashSet<_> = entries.iter().map(|e| e.id).collect();
      assert_eq!(unique.len(), entries.len());
    }
  }

  #[test]
  fn failed_writes_leave_the_set_untouched() {
    let favorites = Favorites::load(ReadOnlyStore);
    let mut changes = favorites.subscribe();

    let result = favorites.toggle(&user(1, "octocat"));

    assert!(matches!(result, Err(FavoritesError::Storage(_))));
    assert!(!favorites.is_favorite(1));
    assert!(!changes.has_changed().unwrap());
  }

  #[test]
  fn subscribers_see_toggles_from_other_views() {
    let favorites = Favorites::load(MemoryStore::new());
    let mut favorites_view = favorites.subscribe();

    favorites.toggle(&user(7, "octocat")).unwrap();

    assert!(favorites_view.has_changed().unwrap());
    let seen = favorites_view.borrow_and_update().clone();
    assert_eq!(seen, [user(7, "octocat")]);
  }

  #[test]
  fn file_backed_sets_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let first = Favorites::load(FileStore::new(dir.path()));
    first.toggle(&user(1, "octocat")).unwrap();
    first.toggle(&user(2, "hubot")).unwrap();

    let second = Favorites::load(FileStore::new(dir.path()));

    assert_eq!(second.entries(), [user(1, "octocat"), user(2, "hubot")]);
  }
}
