use github::Directory;
use repositories::KeyValueStore;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{event, Level};

use crate::{
  app::{App, Flow},
  command::Command,
  routes::Route,
};

/// Reads commands from stdin until `:quit` or end of input, re-rendering the
/// current view after every command and whenever the search results or the
/// favorites change underneath it.
#[allow(clippy::redundant_pub_crate)] // Select macro propagates this
pub async fn run<D: Directory, S: KeyValueStore>(app: &mut App<'_, D, S>) {
  let mut lines = BufReader::new(stdin()).lines();
  let mut search = app.pager().subscribe();
  let mut favorites = app.favorites().subscribe();

  show(&app.render());
  loop {
    tokio::select! {
      line = lines.next_line() => {
        let line = match line {
          Ok(Some(line)) => line,
          Ok(None) => break,
          Err(e) => {
            event!(Level::ERROR, "Failed to read input: {e}");
            break;
          }
        };

        let flow = match line.parse::<Command>() {
          Ok(command) => app.handle(command).await,
          Err(e) => Err(e),
        };
        match flow {
          Ok(Flow::Render) => show(&app.render()),
          Ok(Flow::Say(message)) => show(&message),
          Ok(Flow::Quit) => break,
          Err(e) => show(&format!("{e:#}")),
        }
        // Already rendered
        search.mark_unchanged();
        favorites.mark_unchanged();
      },
      Ok(()) = search.changed() => {
        if app.route() == &Route::Search {
          show(&app.render());
        }
      },
      Ok(()) = favorites.changed() => show(&app.render()),
    }
  }

  event!(Level::INFO, "Input closed.");
}

fn show(text: &str) {
  println!("{}", text.trim_end());
}
