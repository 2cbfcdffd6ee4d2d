use std::sync::Arc;

use anyhow::{bail, Context};
use github::Directory;
use repositories::{favorites::Favorites, KeyValueStore};
use services::{
  load_detail::{self, Detail},
  search::{LoadOutcome, Pager, QueryController},
};
use tracing::{event, Level};
use types::entities::entry::Entry;
use views::{UserCard, UserRow};

use crate::{
  command::{Command, Target, AVAILABLE_COMMANDS},
  pages,
  routes::Route,
};

/// What the driver should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
  Render,
  Say(String),
  Quit,
}

pub struct App<'f, D, S> {
  directory: Arc<D>,
  controller: QueryController<Arc<D>>,
  favorites: &'f Favorites<S>,
  route: Route,
  history: Vec<Route>,
  detail: Detail,
}
impl<'f, D: Directory, S: KeyValueStore> App<'f, D, S> {
  pub fn new(directory: Arc<D>, favorites: &'f Favorites<S>) -> Self {
    let pager = Arc::new(Pager::new(Arc::clone(&directory)));
    Self::with_controller(directory, QueryController::new(pager), favorites)
  }

  pub const fn with_controller(
    directory: Arc<D>,
    controller: QueryController<Arc<D>>,
    favorites: &'f Favorites<S>,
  ) -> Self {
    Self {
      directory,
      controller,
      favorites,
      route: Route::Search,
      history: Vec::new(),
      detail: Detail::Pending,
    }
  }

  pub const fn route(&self) -> &Route {
    &self.route
  }

  pub const fn pager(&self) -> &Arc<Pager<Arc<D>>> {
    self.controller.pager()
  }

  pub const fn favorites(&self) -> &'f Favorites<S> {
    self.favorites
  }

  /// The current view.
  pub fn render(&self) -> String {
    match &self.route {
      Route::Search => pages::search(&self.pager().snapshot(), self.favorites),
      Route::Profile(_) => pages::profile(&self.detail, self.favorites),
      Route::Favorites => pages::favorites(self.favorites),
    }
  }

  /// # Errors
  ///
  /// When the command does not apply to the current view or a favorite
  /// could not be saved.
  pub async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
    match command {
      Command::Search(text) => {
        if self.route != Route::Search {
          self.navigate(Route::Search).await;
        }
        self.controller.input(text).await;
      }
      Command::More => {
        if self.route != Route::Search {
          bail!("There is nothing to load here");
        }
        if self.pager().proximity().await == LoadOutcome::Busy {
          return Ok(Flow::Say("Still loading...".into()));
        }
      }
      Command::Open(target) => {
        let route = match target {
          Target::Row(row) => Route::profile(&self.row(row)?.login)?,
          Target::Handle(handle) => Route::profile(&handle)?,
        };
        self.navigate(route).await;
      }
      Command::Favorite(row) => return self.toggle_favorite(row),
      Command::Favorites => self.navigate(Route::Favorites).await,
      Command::Back => {
        if !self.back().await {
          return Ok(Flow::Say("Nothing to go back to".into()));
        }
      }
      Command::Home => self.navigate(Route::Search).await,
      Command::Go(route) => self.navigate(route).await,
      Command::Help => return Ok(Flow::Say(AVAILABLE_COMMANDS.into())),
      Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Render)
  }

  async fn navigate(&mut self, route: Route) {
    event!(Level::DEBUG, "Navigating from {} to {route}.", self.route);
    let previous = std::mem::replace(&mut self.route, route);
    self.history.push(previous);
    self.mount().await;
  }

  /// Returns whether there was a view to go back to.
  async fn back(&mut self) -> bool {
    let Some(previous) = self.history.pop() else {
      return false;
    };
    self.route = previous;
    self.mount().await;
    true
  }

  /// Profiles fetch their detail every time they are shown.
  async fn mount(&mut self) {
    self.detail = Detail::Pending;
    if let Route::Profile(handle) = &self.route {
      self.detail = load_detail::act(&*self.directory, handle).await;
    }
  }

  /// Entry behind a 1-based row of the list being shown.
  fn row(&self, row: usize) -> anyhow::Result<Entry> {
    let users = match &self.route {
      Route::Search => self.pager().snapshot().results,
      Route::Favorites => self.favorites.entries(),
      Route::Profile(_) => bail!("There are no rows on a profile"),
    };
    row
      .checked_sub(1)
      .and_then(|index| users.into_iter().nth(index))
      .with_context(|| format!("There is no row {row}"))
  }

  fn toggle_favorite(&self, row: Option<usize>) -> anyhow::Result<Flow> {
    let toggle = |user: &Entry| self.favorites.toggle(user);
    let is_favorite = match (row, &self.detail, &self.route) {
      (None, Detail::Loaded(user), Route::Profile(_)) => {
        UserCard::new(user, self.favorites.is_favorite(user.id)).toggle(toggle)?
      }
      (None, _, Route::Profile(_)) => bail!("The profile has not loaded"),
      (None, _, _) => bail!("Which row? Usage: :fav <row>"),
      (Some(row), _, _) => {
        let user = self.row(row)?;
        UserRow::new(&user, self.favorites.is_favorite(user.id)).toggle(toggle)?
      }
    };
    event!(Level::TRACE, "Favorite toggled, now {is_favorite}.");
    Ok(Flow::Render)
  }
}
