use std::{
  fs,
  io::{ErrorKind, Write},
  path::PathBuf,
};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use tracing::{event, Level};

use crate::{validate_key, KeyValueStore, KvError, Loadable};

/// Stores each key as its own file inside `directory`.
///
/// Writes go to a temporary file that is renamed over the previous value, so
/// a reader never sees a half-written document.
pub struct FileStore {
  directory: PathBuf,
}
impl FileStore {
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    Self {
      directory: directory.into(),
    }
  }

  fn path_of(&self, key: &str) -> Result<PathBuf, KvError> {
    Ok(self.directory.join(validate_key(key)?))
  }
}
impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Loadable<String> {
    match fs::read_to_string(self.path_of(key)?) {
      Ok(value) => Ok(Some(value)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
    let path = self.path_of(key)?;
    fs::create_dir_all(&self.directory)?;

    AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
      .write(|file| file.write_all(value.as_bytes()))
      .map_err(|e| match e {
        atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => KvError::Io(e),
      })?;

    event!(Level::DEBUG, "Wrote {} bytes to {path:?}.", value.len());
    Ok(())
  }
}
