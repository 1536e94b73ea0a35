// core/src/flash.rs

//! Session-scoped flash messages.
//!
//! A handler queues a message with [`FlashStore::set`]; the next page render
//! for the same session takes every queued message with [`FlashStore::drain`],
//! which also clears them. Redirects do not consume anything, so a message
//! survives any number of redirects until a page is actually rendered.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Opaque identity of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
  pub fn generate() -> Self {
    SessionId(Uuid::new_v4())
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Uuid::parse_str(raw).ok().map(SessionId)
  }
}

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashKind {
  Success,
  Error,
}

impl FlashKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      FlashKind::Success => "success",
      FlashKind::Error => "error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
  pub kind: FlashKind,
  pub text: String,
}

/// Undelivered queues older than this are dropped.
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(10 * 60);
/// Upper bound on sessions holding undelivered messages.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct Queue {
  touched: Instant,
  messages: Vec<FlashMessage>,
}

/// Per-session message queues, shared by all workers of the server.
///
/// Clients that never send their session cookie back never drain their
/// queue, so the map is bounded: queues idle for longer than `ttl` are
/// evicted on every `set`, and when `max_sessions` is reached the least
/// recently touched queue is dropped.
#[derive(Debug)]
pub struct FlashStore {
  sessions: Mutex<HashMap<SessionId, Queue>>,
  ttl: Duration,
  max_sessions: usize,
}

impl Default for FlashStore {
  fn default() -> Self {
    Self::with_limits(DEFAULT_FLASH_TTL, DEFAULT_MAX_SESSIONS)
  }
}

impl FlashStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// `max_sessions` of zero is treated as one.
  pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
    FlashStore {
      sessions: Mutex::new(HashMap::new()),
      ttl,
      max_sessions: max_sessions.max(1),
    }
  }

  /// Queues a message. Messages of the same kind accumulate in order.
  pub fn set(&self, session: SessionId, kind: FlashKind, text: impl Into<String>) {
    let now = Instant::now();
    let mut sessions = self.sessions.lock();

    let ttl = self.ttl;
    sessions.retain(|_, queue| now.duration_since(queue.touched) <= ttl);

    if !sessions.contains_key(&session) && sessions.len() >= self.max_sessions {
      let oldest = sessions
        .iter()
        .min_by_key(|(_, queue)| queue.touched)
        .map(|(id, _)| *id);
      if let Some(oldest) = oldest {
        debug!(session = %oldest, "Evicting undelivered flash messages.");
        sessions.remove(&oldest);
      }
    }

    let queue = sessions.entry(session).or_insert_with(|| Queue {
      touched: now,
      messages: Vec::new(),
    });
    queue.touched = now;
    queue.messages.push(FlashMessage { kind, text: text.into() });
  }

  /// Removes and returns all queued messages for `session`, oldest first.
  /// Expired queues yield nothing.
  pub fn drain(&self, session: SessionId) -> Vec<FlashMessage> {
    match self.sessions.lock().remove(&session) {
      Some(queue) if queue.touched.elapsed() <= self.ttl => queue.messages,
      _ => Vec::new(),
    }
  }

  /// Number of sessions holding undelivered messages.
  pub fn pending_sessions(&self) -> usize {
    self.sessions.lock().len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn drain_returns_messages_in_order_and_clears() {
    let store = FlashStore::new();
    let session = SessionId::generate();
    store.set(session, FlashKind::Error, "first");
    store.set(session, FlashKind::Success, "second");

    let drained = store.drain(session);
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].kind, FlashKind::Error);
    assert_eq!(drained[1].text, "second");

    assert!(store.drain(session).is_empty());
    assert_eq!(store.pending_sessions(), 0);
  }

  #[test]
  fn sessions_do_not_see_each_other() {
    let store = FlashStore::new();
    let alice = SessionId::generate();
    let bob = SessionId::generate();
    store.set(alice, FlashKind::Success, "saved");

    assert!(store.drain(bob).is_empty());
    assert_eq!(store.drain(alice).len(), 1);
  }

  #[test]
  fn session_count_is_capped() {
    let store = FlashStore::with_limits(Duration::from_secs(600), 3);
    let sessions: Vec<SessionId> = (0..10).map(|_| SessionId::generate()).collect();
    for session in &sessions {
      store.set(*session, FlashKind::Success, "saved");
    }

    assert_eq!(store.pending_sessions(), 3);
    // The most recent sessions survive.
    assert_eq!(store.drain(sessions[9]).len(), 1);
    assert!(store.drain(sessions[0]).is_empty());
  }

  #[test]
  fn existing_session_is_not_evicted_by_its_own_messages() {
    let store = FlashStore::with_limits(Duration::from_secs(600), 1);
    let session = SessionId::generate();
    store.set(session, FlashKind::Error, "one");
    store.set(session, FlashKind::Error, "two");
    assert_eq!(store.drain(session).len(), 2);
  }

  #[test]
  fn expired_queues_are_dropped() {
    let store = FlashStore::with_limits(Duration::from_millis(10), 100);
    let stale = SessionId::generate();
    store.set(stale, FlashKind::Success, "old");
    std::thread::sleep(Duration::from_millis(30));

    store.set(SessionId::generate(), FlashKind::Success, "new");
    assert_eq!(store.pending_sessions(), 1);
    assert!(store.drain(stale).is_empty());
  }

  #[test]
  fn session_id_round_trips_through_cookie_text() {
    let id = SessionId::generate();
    assert_eq!(SessionId::parse(&id.to_string()), Some(id));
    assert_eq!(SessionId::parse("not-a-session"), None);
  }
}
