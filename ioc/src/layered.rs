//! A read-through, write-delegating view over another injector.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::Component;
use crate::definition::Definition;
use crate::error::{InjectError, Result};
use crate::events::{Event, Listener};
use crate::injector::Injector;

/// A shadow value supplied to [`Injector::merge_dependencies`].
#[derive(Clone)]
pub enum Override {
  /// Served as the cached instance for the name.
  Instance(Component),
  /// Served as the definition for the name.
  Definition(Definition),
}

impl Override {
  pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
    Override::Instance(Arc::new(value))
  }
}

impl From<Component> for Override {
  fn from(component: Component) -> Self {
    Override::Instance(component)
  }
}

impl From<Definition> for Override {
  fn from(definition: Definition) -> Self {
    Override::Definition(definition)
  }
}

impl fmt::Debug for Override {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Override::Instance(_) => f.write_str("Instance(..)"),
      Override::Definition(definition) => f.debug_tuple("Definition").field(definition).finish(),
    }
  }
}

/// An injector that shadows some names of a base injector.
///
/// Lookups check the overrides first and fall back to the base. Every write
/// (`set_dependency`, `set_definition`, `register`) goes to the base, so a
/// component built while resolving through the layer becomes a permanent
/// instance of the base. Event subscription and emission are forwarded to the
/// base as well, so every layer over one base observes the same stream.
pub struct OverrideLayer<'a> {
  base: &'a dyn Injector,
  overrides: HashMap<String, Override>,
}

impl<'a> OverrideLayer<'a> {
  pub fn new<I, K>(base: &'a dyn Injector, overrides: I) -> Self
  where
    I: IntoIterator<Item = (K, Override)>,
    K: Into<String>,
  {
    Self {
      base,
      overrides: overrides
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect(),
    }
  }

  pub fn base(&self) -> &'a dyn Injector {
    self.base
  }

  pub fn is_overridden(&self, name: &str) -> bool {
    self.overrides.contains_key(name)
  }
}

impl Injector for OverrideLayer<'_> {
  fn get_dependency(&self, name: &str) -> Option<Component> {
    match self.overrides.get(name) {
      Some(Override::Instance(component)) => Some(Arc::clone(component)),
      _ => self.base.get_dependency(name),
    }
  }

  fn set_dependency(&self, name: &str, component: Component) {
    self.base.set_dependency(name, component);
  }

  fn get_definition(&self, name: &str) -> Option<Definition> {
    match self.overrides.get(name) {
      Some(Override::Definition(definition)) => Some(definition.clone()),
      _ => self.base.get_definition(name),
    }
  }

  fn set_definition(&self, name: &str, definition: Definition) {
    self.base.set_definition(name, definition);
  }

  /// Base names followed by every override name. A name present in both is
  /// listed twice.
  fn dependency_names(&self) -> Vec<String> {
    let mut names = self.base.dependency_names();
    names.extend(self.overrides.keys().cloned());
    names
  }

  fn on(&self, event: Event, listener: Listener) {
    self.base.on(event, listener);
  }

  fn emit(&self, event: Event, component: &Component) {
    self.base.emit(event, component);
  }

  fn register(&self, name: &str, component: Component) -> Result<()> {
    if let Some(Override::Instance(_)) = self.overrides.get(name) {
      return Err(InjectError::AlreadyRegistered(name.to_owned()));
    }
    self.base.register(name, component)
  }
}

impl fmt::Debug for OverrideLayer<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OverrideLayer")
      .field("overrides", &self.overrides)
      .finish_non_exhaustive()
  }
}
