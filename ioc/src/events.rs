//! A small observer registry for injector notifications.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::Component;

/// Notifications an injector publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
  /// A component was freshly built. Fired once per successful build, never on
  /// a cache hit.
  Created,
}

impl Event {
  pub fn as_str(&self) -> &'static str {
    match self {
      Event::Created => "created",
    }
  }
}

impl fmt::Display for Event {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A subscriber callback.
pub type Listener = Arc<dyn Fn(&Component) + Send + Sync>;

/// Listener storage owned by a `Container`.
#[derive(Default)]
pub struct Events {
  listeners: RwLock<HashMap<Event, Vec<Listener>>>,
}

impl Events {
  pub fn on(&self, event: Event, listener: Listener) {
    self.listeners.write().entry(event).or_default().push(listener);
  }

  /// Calls every listener registered for `event`, in subscription order.
  ///
  /// Listeners run outside the lock, so they may subscribe or emit themselves.
  pub fn emit(&self, event: Event, component: &Component) {
    let snapshot: Vec<Listener> = match self.listeners.read().get(&event) {
      Some(listeners) => listeners.clone(),
      None => return,
    };
    for listener in snapshot {
      listener(component);
    }
  }

  pub fn listener_count(&self, event: Event) -> usize {
    self.listeners.read().get(&event).map_or(0, Vec::len)
  }
}

impl fmt::Debug for Events {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Events")
      .field("created", &self.listener_count(Event::Created))
      .finish()
  }
}
