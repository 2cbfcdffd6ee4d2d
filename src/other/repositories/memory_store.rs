use std::{
  collections::HashMap,
  sync::{PoisonError, RwLock},
};

use crate::{validate_key, KeyValueStore, KvError, Loadable};

/// Keeps values in memory only. Used for ephemeral sessions and in tests.
#[derive(Default)]
pub struct MemoryStore(RwLock<HashMap<String, String>>);
impl MemoryStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a store already holding `value` under `key`.
  #[must_use]
  pub fn with(key: &str, value: &str) -> Self {
    Self(RwLock::new(HashMap::from([(
      key.to_string(),
      value.to_string(),
    )])))
  }
}
impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Loadable<String> {
    let key = validate_key(key)?;
    let values = self.0.read().unwrap_or_else(PoisonError::into_inner);
    let value = values.get(key).cloned();
    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
    let key = validate_key(key)?;
    let mut values = self.0.write().unwrap_or_else(PoisonError::into_inner);
    values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}
