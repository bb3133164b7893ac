//! The main `Container` struct and its builder.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::core::Component;
use crate::definition::Definition;
use crate::error::{InjectError, Result};
use crate::events::{Event, Events, Listener};
use crate::injector::Injector;

/// The base dependency injector.
///
/// Owns the cache of resolved instances and the map of definitions. Both maps
/// are concurrent, so a container can be shared between threads, while each
/// individual resolution runs to completion on the calling stack.
#[derive(Default)]
pub struct Container {
  instances: DashMap<String, Component>,
  definitions: DashMap<String, Definition>,
  events: Events,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container seeded with already-built instances and definitions.
  pub fn with_state<I, D>(instances: I, definitions: D) -> Self
  where
    I: IntoIterator<Item = (String, Component)>,
    D: IntoIterator<Item = Definition>,
  {
    let container = Self::new();
    for (name, component) in instances {
      container.instances.insert(name, component);
    }
    for definition in definitions {
      container
        .definitions
        .insert(definition.name().to_owned(), definition);
    }
    container
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::default()
  }

  pub fn has_dependency(&self, name: &str) -> bool {
    self.instances.contains_key(name)
  }

  pub fn has_definition(&self, name: &str) -> bool {
    self.definitions.contains_key(name)
  }

  pub fn definition_names(&self) -> Vec<String> {
    self.definitions.iter().map(|entry| entry.key().clone()).collect()
  }
}

impl Injector for Container {
  fn get_dependency(&self, name: &str) -> Option<Component> {
    self.instances.get(name).map(|entry| Arc::clone(entry.value()))
  }

  fn set_dependency(&self, name: &str, component: Component) {
    self.instances.insert(name.to_owned(), component);
  }

  fn get_definition(&self, name: &str) -> Option<Definition> {
    self.definitions.get(name).map(|entry| entry.value().clone())
  }

  fn set_definition(&self, name: &str, definition: Definition) {
    self.definitions.insert(name.to_owned(), definition);
  }

  fn dependency_names(&self) -> Vec<String> {
    self.instances.iter().map(|entry| entry.key().clone()).collect()
  }

  fn on(&self, event: Event, listener: Listener) {
    self.events.on(event, listener);
  }

  fn emit(&self, event: Event, component: &Component) {
    self.events.emit(event, component);
  }

  // The presence check and the insert happen under one shard lock.
  fn register(&self, name: &str, component: Component) -> Result<()> {
    match self.instances.entry(name.to_owned()) {
      Entry::Occupied(_) => Err(InjectError::AlreadyRegistered(name.to_owned())),
      Entry::Vacant(slot) => {
        slot.insert(component);
        debug!(component = name, "registered component");
        Ok(())
      }
    }
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("instances", &self.instances.len())
      .field("definitions", &self.definitions.len())
      .field("events", &self.events)
      .finish()
  }
}

/// A builder for seeding a [`Container`] before first use.
#[derive(Default)]
pub struct ContainerBuilder {
  instances: Vec<(String, Component)>,
  definitions: Vec<Definition>,
  listeners: Vec<(Event, Listener)>,
}

impl ContainerBuilder {
  /// Seeds a ready instance. Seeded instances do not fire `Event::Created`.
  pub fn instance<T: Any + Send + Sync>(self, name: &str, value: T) -> Self {
    self.component(name, Arc::new(value))
  }

  pub fn component(mut self, name: &str, component: Component) -> Self {
    self.instances.push((name.to_owned(), component));
    self
  }

  /// Adds a definition. A later definition with the same name wins.
  pub fn definition(mut self, definition: Definition) -> Self {
    self.definitions.push(definition);
    self
  }

  pub fn listener(mut self, event: Event, listener: Listener) -> Self {
    self.listeners.push((event, listener));
    self
  }

  pub fn build(self) -> Container {
    let container = Container::with_state(self.instances, self.definitions);
    for (event, listener) in self.listeners {
      container.on(event, listener);
    }
    container
  }
}

impl fmt::Debug for ContainerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContainerBuilder")
      .field("instances", &self.instances.len())
      .field("definitions", &self.definitions)
      .field("listeners", &self.listeners.len())
      .finish()
  }
}
