pub mod favorites;
mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use thiserror::Error as ThisError;

/// # Loadable<T>
/// Represents the type of a T that can be loaded from the
/// key-value store, where the read can either fail, resolve to None
/// or resolve to Some(T).
///
/// ## Variants
/// - Err(e)           read failed
/// - Ok(None)         key not found
/// - Ok(Some(T))      T found
pub type Loadable<T> = Result<Option<T>, KvError>;

#[derive(ThisError, Debug)]
pub enum KvError {
  #[error("Invalid key: {0:?}")]
  InvalidKey(String),
  #[error("Storage error: {0}")]
  Io(#[from] std::io::Error),
}

/// A string-to-string store. Every `set` overwrites the whole value.
pub trait KeyValueStore: Send + Sync {
  /// # Errors
  ///
  /// When the key is invalid or the underlying storage fails to read.
  fn get(&self, key: &str) -> Loadable<String>;

  /// # Errors
  ///
  /// When the key is invalid or the underlying storage fails to write.
  fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
}

/// Keys double as file names, so they are limited to `[A-Za-z0-9_-]`.
fn validate_key(key: &str) -> Result<&str, KvError> {
  let valid = !key.is_empty()
    && key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if valid {
    Ok(key)
  } else {
    Err(KvError::InvalidKey(key.to_string()))
  }
}
