//! Plain-text renderings of directory entries.
//!
//! Components hold no state: each is built from an entry and its favorite
//! flag, rendered through `Display`, and reports clicks on its favorite marker
//! through `toggle`.

mod card;
mod row;

pub use card::UserCard;
pub use row::UserRow;

/// Marker drawn next to an entry, filled when it is a favorite.
#[must_use]
pub const fn favorite_marker(is_favorite: bool) -> &'static str {
  if is_favorite {
    "★"
  } else {
    "☆"
  }
}

/// What activating the favorite marker will do.
#[must_use]
pub const fn favorite_label(is_favorite: bool) -> &'static str {
  if is_favorite {
    "Remove from Favorites"
  } else {
    "Add to Favorites"
  }
}
