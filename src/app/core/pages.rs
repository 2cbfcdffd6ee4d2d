use repositories::{favorites::Favorites, KeyValueStore};
use services::{load_detail::Detail, search::SearchState};
use types::entities::entry::Entry;
use views::{favorite_marker, UserCard, UserRow};

pub static NO_RESULTS: &str = "No search results ...";

/// Search box and result list. A status replaces the list.
pub fn search<S: KeyValueStore>(state: &SearchState, favorites: &Favorites<S>) -> String {
  let mut page = format!("Search for GitHub users...: {}\n", state.query);
  if let Some(status) = state.status {
    page.push_str(status.message());
    page.push('\n');
  } else if state.results.is_empty() {
    page.push_str(NO_RESULTS);
    page.push('\n');
  } else {
    push_rows(&mut page, &state.results, favorites);
  }
  page
}

/// Back arrow, handle and marker, then the card once the detail arrives.
pub fn profile<S: KeyValueStore>(detail: &Detail, favorites: &Favorites<S>) -> String {
  match detail {
    Detail::Pending => String::new(),
    Detail::Failed => format!("Error: {}\n", detail.error().unwrap_or_default()),
    Detail::Loaded(user) => {
      let is_favorite = favorites.is_favorite(user.id);
      format!(
        "< @{}  {}\n{}",
        user.login,
        favorite_marker(is_favorite),
        UserCard::new(user, is_favorite)
      )
    }
  }
}

pub fn favorites<S: KeyValueStore>(favorites: &Favorites<S>) -> String {
  let mut page = format!("< Favorites {}\n", favorite_marker(true));
  push_rows(&mut page, &favorites.entries(), favorites);
  page
}

fn push_rows<S: KeyValueStore>(page: &mut String, users: &[Entry], favorites: &Favorites<S>) {
  for (row, user) in users.iter().enumerate() {
    let line = UserRow::new(user, favorites.is_favorite(user.id));
    page.push_str(&format!("{:>3}. {line}\n", row + 1));
  }
}

#[cfg(test)]
mod tests {
  use repositories::MemoryStore;
  use services::{load_detail::DETAIL_FAILURE, search::Status};

  use super::*;

  fn octocat() -> Entry {
    Entry::listed(1, "octocat", "https://avatars.example/u/1")
  }

  fn state(results: Vec<Entry>, status: Option<Status>) -> SearchState {
    SearchState {
      query: "octo".into(),
      results,
      status,
      ..SearchState::default()
    }
  }

  #[test]
  fn empty_search_shows_the_no_results_line() {
    let favorites = Favorites::load(MemoryStore::new());
    let page = search(&state(Vec::new(), None), &favorites);
    assert_eq!(page, "Search for GitHub users...: octo\nNo search results ...\n");
  }

  #[test]
  fn status_replaces_the_result_list() {
    let favorites = Favorites::load(MemoryStore::new());
    let page = search(&state(vec![octocat()], Some(Status::QuotaExhausted)), &favorites);
    assert!(page.contains("No more users to load or rate limit hit"));
    assert!(!page.contains("@octocat"));
  }

  #[test]
  fn rows_are_numbered_and_marked() {
    let favorites = Favorites::load(MemoryStore::new());
    favorites.toggle(&octocat()).unwrap();
    let second = Entry::listed(2, "hubot", "https://avatars.example/u/2");

    let page = search(&state(vec![octocat(), second], None), &favorites);

    let lines: Vec<_> = page.lines().collect();
    assert_eq!(lines[1], "  1. ★ @octocat  <https://avatars.example/u/1>  -> /user/octocat");
    assert_eq!(lines[2], "  2. ☆ @hubot  <https://avatars.example/u/2>  -> /user/hubot");
  }

  #[test]
  fn failed_detail_shows_only_the_error_line() {
    let favorites = Favorites::load(MemoryStore::new());
    let page = profile(&Detail::Failed, &favorites);
    assert_eq!(page, format!("Error: {DETAIL_FAILURE}\n"));
  }

  #[test]
  fn pending_detail_renders_nothing() {
    let favorites = Favorites::load(MemoryStore::new());
    assert_eq!(profile(&Detail::Pending, &favorites), "");
  }

  #[test]
  fn loaded_detail_shows_header_and_card() {
    let favorites = Favorites::load(MemoryStore::new());
    let page = profile(&Detail::Loaded(octocat()), &favorites);
    assert!(page.starts_with("< @octocat  ☆\n[https://avatars.example/u/1]\n"));
    assert!(page.contains("Add to Favorites"));
  }

  #[test]
  fn favorites_page_lists_the_store() {
    let favorites = Favorites::load(MemoryStore::new());
    assert_eq!(self::favorites(&favorites), "< Favorites ★\n");

    favorites.toggle(&octocat()).unwrap();

    assert!(self::favorites(&favorites).contains("  1. ★ @octocat"));
  }
}
