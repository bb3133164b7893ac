//! Definitions: the stored recipe for building one named component.

use std::any::{type_name, Any};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::{BoxError, Component, ResolutionContext};
use crate::error::{ArgumentError, InjectError};

/// The raw build function stored in a [`Definition`].
///
/// It receives the resolved dependencies (in declaration order) followed by any
/// late-bound arguments, and returns the value the [`Strategy`] turns into a
/// component.
pub type BuildFn = Arc<dyn Fn(&Args) -> Result<Box<dyn Any + Send + Sync>, BoxError> + Send + Sync>;

/// How a definition's build function turns into a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
  /// The build function is a constructor. Whatever it returns is moved into a
  /// freshly allocated component.
  #[default]
  Construct,
  /// The build function is a plain factory that returns a ready [`Component`],
  /// which is used as-is.
  Invoke,
}

impl Strategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      Strategy::Construct => "construct",
      Strategy::Invoke => "invoke",
    }
  }

  /// Calls the bound build function and applies this strategy to the result.
  pub fn instantiate(&self, injected: &Injected) -> Result<Component, BoxError> {
    let value = injected.call()?;
    match self {
      Strategy::Construct => Ok(Component::from(value)),
      Strategy::Invoke => value
        .downcast::<Component>()
        .map(|component| *component)
        .map_err(|_| "invoke strategy requires the build function to return a Component".into()),
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Strategy {
  type Err = InjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "construct" | "ctor" => Ok(Strategy::Construct),
      "invoke" | "func" => Ok(Strategy::Invoke),
      _ => Err(InjectError::UnknownStrategy(s.to_owned())),
    }
  }
}

/// The ordered argument list handed to a build function.
#[derive(Clone, Default)]
pub struct Args {
  values: Vec<Component>,
}

impl Args {
  pub fn new(values: Vec<Component>) -> Self {
    Self { values }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The untyped argument at `index`.
  pub fn raw(&self, index: usize) -> Option<&Component> {
    self.values.get(index)
  }

  /// The argument at `index`, downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ArgumentError> {
    let value = self.values.get(index).ok_or(ArgumentError::Missing {
      index,
      len: self.values.len(),
    })?;
    value
      .clone()
      .downcast::<T>()
      .map_err(|_| ArgumentError::TypeMismatch {
        index,
        expected: type_name::<T>(),
      })
  }
}

impl fmt::Debug for Args {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Args").field("len", &self.values.len()).finish()
  }
}

/// A build function with its dependencies already resolved.
///
/// Returned by `Injector::inject`. Calling it applies the build function to the
/// resolved dependencies, followed by any extra call-time arguments.
#[derive(Clone)]
pub struct Injected {
  resolved: Vec<Component>,
  build_fn: BuildFn,
}

impl Injected {
  pub(crate) fn new(resolved: Vec<Component>, build_fn: BuildFn) -> Self {
    Self { resolved, build_fn }
  }

  pub fn resolved(&self) -> &[Component] {
    &self.resolved
  }

  pub fn call(&self) -> Result<Box<dyn Any + Send + Sync>, BoxError> {
    self.call_with(Vec::new())
  }

  pub fn call_with(&self, extra: Vec<Component>) -> Result<Box<dyn Any + Send + Sync>, BoxError> {
    let mut values = Vec::with_capacity(self.resolved.len() + extra.len());
    values.extend(self.resolved.iter().cloned());
    values.extend(extra);
    (self.build_fn)(&Args::new(values))
  }
}

impl fmt::Debug for Injected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Injected")
      .field("resolved", &self.resolved.len())
      .finish_non_exhaustive()
  }
}

/// An immutable record describing how to build one named component.
#[derive(Clone)]
pub struct Definition {
  name: String,
  deps: Vec<String>,
  build_fn: BuildFn,
  strategy: Strategy,
}

impl Definition {
  pub fn new(name: &str, deps: &[&str], strategy: Strategy, build_fn: BuildFn) -> Self {
    Self {
      name: name.to_owned(),
      deps: deps.iter().map(|d| (*d).to_owned()).collect(),
      build_fn,
      strategy,
    }
  }

  /// A definition whose build function constructs a new `T` on every build.
  pub fn constructor<T, F>(name: &str, deps: &[&str], f: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Args) -> Result<T, BoxError> + Send + Sync + 'static,
  {
    let build_fn: BuildFn = Arc::new(move |args: &Args| {
      f(args).map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
    });
    Self::new(name, deps, Strategy::Construct, build_fn)
  }

  /// A definition whose build function returns a ready component.
  pub fn factory<F>(name: &str, deps: &[&str], f: F) -> Self
  where
    F: Fn(&Args) -> Result<Component, BoxError> + Send + Sync + 'static,
  {
    let build_fn: BuildFn = Arc::new(move |args: &Args| {
      f(args).map(|component| Box::new(component) as Box<dyn Any + Send + Sync>)
    });
    Self::new(name, deps, Strategy::Invoke, build_fn)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn deps(&self) -> &[String] {
    &self.deps
  }

  pub fn strategy(&self) -> Strategy {
    self.strategy
  }

  /// Everything an injector needs to perform injection for this definition.
  pub fn build_arguments<'c>(
    &self,
    context: &'c mut ResolutionContext,
  ) -> (Vec<String>, BuildFn, &'c mut ResolutionContext) {
    (self.deps.clone(), Arc::clone(&self.build_fn), context)
  }

  pub fn instantiate(&self, injected: &Injected) -> Result<Component, BoxError> {
    self.strategy.instantiate(injected)
  }
}

impl fmt::Debug for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Definition")
      .field("name", &self.name)
      .field("deps", &self.deps)
      .field("strategy", &self.strategy)
      .finish_non_exhaustive()
  }
}
