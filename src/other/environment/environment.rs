use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use tracing::level_filters::LevelFilter;

use crate::{owned_var_or, try_leak, var_opt, var_or, var_or_else};

lazy_static! {
  pub static ref CONSOLE_LOG_SEVERITY: LevelFilter =
    owned_var_or("CONSOLE_LOG_SEVERITY", LevelFilter::WARN);
  pub static ref LOG_DIRECTORY: &'static Path =
    var_or_else("LOG_DIRECTORY", || PathBuf::from("logs"));
  pub static ref GITHUB_API_URL: &'static str =
    var_or::<String, _>("GITHUB_API_URL", "https://api.github.com");
  pub static ref GITHUB_TOKEN: Option<&'static str> = var_opt::<String, _>("GITHUB_TOKEN");
  pub static ref STORAGE_DIRECTORY: &'static Path =
    var_or_else("STORAGE_DIRECTORY", || PathBuf::from("storage"));
}

#[cfg(debug_assertions)]
lazy_static! {
  pub static ref WORKSPACE_DIR: &'static Path = {
    let output = std::process::Command::new(env!("CARGO"))
      .arg("locate-project")
      .arg("--workspace")
      .arg("--message-format=plain")
      .output()
      .unwrap_or_else(|e| panic!("Failed to locate the cargo workspace! Error: {e}"))
      .stdout;
    let cargo_path = std::str::from_utf8(&output)
      .map(|s| PathBuf::from(s.trim()))
      .unwrap_or_else(|e| panic!("Cargo returned a non UTF-8 path! Error: {e}"));
    let workspace = cargo_path
      .parent()
      .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    try_leak(workspace).unwrap_or_else(|| panic!("Failed to leak the workspace path!"))
  };
}

#[cfg(not(debug_assertions))]
lazy_static! {
  pub static ref WORKSPACE_DIR: &'static Path =
    try_leak(PathBuf::from(".")).unwrap_or_else(|| panic!("Failed to leak the workspace path!"));
}
