//! Core data structures shared by every injector implementation.

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{InjectError, Result};

/// A built, type-erased component as stored in an injector.
///
/// Components are shared: resolving the same name twice hands out clones of
/// the same `Arc`, so identity can be checked with `Arc::ptr_eq`.
pub type Component = Arc<dyn Any + Send + Sync>;

/// The error type build functions may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Wraps any value as a [`Component`].
pub fn component<T: Any + Send + Sync>(value: T) -> Component {
  Arc::new(value)
}

/// Per-resolution-tree bookkeeping used to detect circular dependencies.
///
/// One context is created for each root `resolve` call and the same context is
/// passed by `&mut` to every nested resolution of that tree. Names are only
/// ever added. A name that finished resolving stays marked, which is harmless
/// because the instance cache answers any later lookup for it before the
/// cycle check could be reached again through a dependency walk.
#[derive(Debug, Default, Clone)]
pub struct ResolutionContext {
  unresolved: HashSet<String>,
}

impl ResolutionContext {
  /// Creates an empty context.
  pub fn new() -> Self {
    Self::default()
  }

  /// Marks `name` as in progress.
  ///
  /// Fails with [`InjectError::CyclicDependency`] if `name` was already
  /// entered within this context.
  pub fn enter(&mut self, name: &str) -> Result<()> {
    if self.unresolved.contains(name) {
      return Err(InjectError::CyclicDependency(name.to_owned()));
    }
    self.unresolved.insert(name.to_owned());
    Ok(())
  }

  /// Returns `true` if `name` has been entered within this context.
  pub fn is_unresolved(&self, name: &str) -> bool {
    self.unresolved.contains(name)
  }

  /// All names entered so far, in no particular order.
  pub fn unresolved(&self) -> impl Iterator<Item = &str> {
    self.unresolved.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.unresolved.len()
  }

  pub fn is_empty(&self) -> bool {
    self.unresolved.is_empty()
  }
}
