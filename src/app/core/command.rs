use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

use crate::routes::Route;

pub static AVAILABLE_COMMANDS: &str = "\
Type anything not starting with ':' to search for users.
  :more              load the next page of results
  :open <row|user>   open a profile by row number or handle
  :fav [row]         toggle a favorite (the open profile when no row is given)
  :favorites         show your favorites
  :back              go back to the previous view
  :home              go to the search view
  :go <path>         open a path such as /user/octocat
  :help              show this help
  :quit              exit";

/// A row in the list being shown, or a user handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  Row(usize),
  Handle(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// New search text. Empty text clears the results.
  Search(String),
  More,
  Open(Target),
  Favorite(Option<usize>),
  Favorites,
  Back,
  Home,
  Go(Route),
  Help,
  Quit,
}
impl FromStr for Command {
  type Err = anyhow::Error;

  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
      return Ok(Self::Search(line.to_string()));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let argument = words.next();
    if words.next().is_some() {
      bail!("Too many arguments for :{name}");
    }

    let command = match (name, argument) {
      ("more", None) => Self::More,
      ("open", Some(target)) => Self::Open(target.parse::<usize>().map_or_else(
        |_| Target::Handle(target.trim_start_matches('@').to_string()),
        Target::Row,
      )),
      ("fav", row) => Self::Favorite(
        row
          .map(|r| r.parse::<usize>().with_context(|| format!("{r:?} is not a row number")))
          .transpose()?,
      ),
      ("favorites", None) => Self::Favorites,
      ("back", None) => Self::Back,
      ("home", None) => Self::Home,
      ("go", Some(path)) => Self::Go(path.parse()?),
      ("help", None) => Self::Help,
      ("quit" | "q", None) => Self::Quit,
      ("open" | "go", None) => bail!(":{name} needs an argument"),
      _ => return Err(anyhow!("Unknown command :{name}. Type :help for help.")),
    };
    Ok(command)
  }
}
