mod app;
mod command;
mod driver;
mod on_shutdown;
mod pages;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use app::App;
use environment::WORKSPACE_DIR;
use github::GitHub;
use on_shutdown::with_graceful_shutdown;
use repositories::favorites::FAVORITES;
use tracing::{event, Level};

#[cfg(unix)]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv::from_filename(WORKSPACE_DIR.join(".env")).ok();
  // Logging - The variables are needed for the lifetime of the program
  let _log_guards = utils::init_logging().await;

  let github = GitHub::from_env().context("Failed to set up the GitHub client")?;
  event!(
    Level::INFO,
    "Application starting! {} favorites loaded.",
    FAVORITES.entries().len()
  );

  let mut app = App::new(Arc::new(github), &*FAVORITES);
  println!("{}", command::AVAILABLE_COMMANDS);

  #[allow(clippy::redundant_pub_crate)] // Select macro propagates this
  let session = async {
    tokio::select! {
      () = driver::run(&mut app) => {},
      () = with_graceful_shutdown() => {},
    }
  };
  session.await;

  Ok(())
}
