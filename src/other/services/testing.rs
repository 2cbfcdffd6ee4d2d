use std::{
  collections::HashMap,
  future::Future,
  sync::{Mutex, PoisonError},
};

use github::{get_user, search_users, Directory, Error};
use tokio::sync::{watch, Semaphore};
use types::entities::entry::Entry;

pub enum Reply {
  Users(Vec<Entry>),
  Quota,
  Http(u16),
}

type Script = Box<dyn Fn(&str, u32) -> Reply + Send + Sync>;

/// In-memory directory answering searches from a script and profiles from a
/// fixed map. A gated directory holds every search until `release` is called.
pub struct ScriptedDirectory {
  script: Script,
  profiles: HashMap<String, Entry>,
  calls: Mutex<Vec<(String, u32)>>,
  gate: Option<Semaphore>,
  outstanding: watch::Sender<usize>,
  max_outstanding: Mutex<usize>,
}
impl ScriptedDirectory {
  pub fn new(script: impl Fn(&str, u32) -> Reply + Send + Sync + 'static) -> Self {
    Self {
      script: Box::new(script),
      profiles: HashMap::new(),
      calls: Mutex::new(Vec::new()),
      gate: None,
      outstanding: watch::Sender::new(0),
      max_outstanding: Mutex::new(0),
    }
  }

  pub fn gated(script: impl Fn(&str, u32) -> Reply + Send + Sync + 'static) -> Self {
    Self {
      gate: Some(Semaphore::new(0)),
      ..Self::new(script)
    }
  }

  pub fn with_profiles(profiles: impl IntoIterator<Item = Entry>) -> Self {
    Self {
      profiles: profiles.into_iter().map(|e| (e.login.clone(), e)).collect(),
      ..Self::new(|_, _| Reply::Users(Vec::new()))
    }
  }

  pub fn calls(&self) -> Vec<(String, u32)> {
    let calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
    calls.clone()
  }

  pub fn max_outstanding(&self) -> usize {
    let max = self.max_outstanding.lock().unwrap_or_else(PoisonError::into_inner);
    *max
  }

  pub async fn wait_for_outstanding(&self, count: usize) {
    let mut outstanding = self.outstanding.subscribe();
    outstanding.wait_for(|c| *c == count).await.unwrap();
  }

  /// Lets `searches` gated searches complete.
  pub fn release(&self, searches: usize) {
    if let Some(gate) = &self.gate {
      gate.add_permits(searches);
    }
  }

  fn begin_search(&self, query: &str, page: u32) -> Outstanding<'_> {
    self
      .calls
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push((query.to_string(), page));
    self.outstanding.send_modify(|c| *c += 1);
    let current = *self.outstanding.borrow();
    let mut max = self.max_outstanding.lock().unwrap_or_else(PoisonError::into_inner);
    *max = (*max).max(current);
    Outstanding(&self.outstanding)
  }
}

/// Counts a search as outstanding until it completes or is dropped.
struct Outstanding<'a>(&'a watch::Sender<usize>);
impl Drop for Outstanding<'_> {
  fn drop(&mut self) {
    self.0.send_modify(|c| *c -= 1);
  }
}

impl Directory for ScriptedDirectory {
  fn search_users(
    &self,
    query: &str,
    page: u32,
  ) -> impl Future<Output = Result<Vec<Entry>, Error<search_users::Error>>> + Send {
    async move {
      let outstanding = self.begin_search(query, page);
      if let Some(gate) = &self.gate {
        gate.acquire().await.unwrap().forget();
      }
      let reply = match (self.script)(query, page) {
        Reply::Users(users) => Ok(users),
        Reply::Quota => Err(Error::QuotaExhausted),
        Reply::Http(code) => Err(Error::Http(code.try_into().unwrap())),
      };
      drop(outstanding);
      reply
    }
  }

  fn get_user(
    &self,
    handle: &str,
  ) -> impl Future<Output = Result<Entry, Error<get_user::Error>>> + Send {
    let profile = self.profiles.get(handle).cloned();
    async move { profile.ok_or(Error::Other(get_user::Error::NotFound)) }
  }
}

/// `count` list-form users for `page`, with ids unique across pages.
pub fn users(page: u32, count: u32) -> Vec<Entry> {
  (0..count)
    .map(|i| {
      let id = u64::from(page) * 1000 + u64::from(i);
      Entry::listed(id, format!("user-{id}"), format!("https://avatars.example/u/{id}"))
    })
    .collect()
}
