//! The `Injector` capability set and the resolution algorithm built on it.

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{BoxError, Component, ResolutionContext};
use crate::definition::{Args, BuildFn, Definition, Injected, Strategy};
use crate::error::{InjectError, Result};
use crate::events::{Event, Listener};
use crate::layered::{Override, OverrideLayer};

/// Everything a dependency injector can do.
///
/// Implementors supply storage and lookup (the required methods). The
/// resolution algorithm (`resolve`, `create`, `build`, `inject`) is provided
/// once here and always goes back through `self` for lookups, so an
/// [`OverrideLayer`] only has to change where names are looked up.
pub trait Injector {
  // --- Storage & lookup ---

  /// The cached instance for `name`, if one exists.
  fn get_dependency(&self, name: &str) -> Option<Component>;

  /// Stores `component` under `name`, replacing any previous instance.
  fn set_dependency(&self, name: &str, component: Component);

  fn get_definition(&self, name: &str) -> Option<Definition>;

  fn set_definition(&self, name: &str, definition: Definition);

  /// Names of all cached instances. Used for diagnostics.
  fn dependency_names(&self) -> Vec<String>;

  // --- Events ---

  fn on(&self, event: Event, listener: Listener);

  fn emit(&self, event: Event, component: &Component);

  // --- Registration ---

  /// Caches `component` under `name`.
  ///
  /// Fails with [`InjectError::AlreadyRegistered`] if `name` already has an
  /// instance. Live instances are never silently replaced.
  fn register(&self, name: &str, component: Component) -> Result<()> {
    if self.get_dependency(name).is_some() {
      return Err(InjectError::AlreadyRegistered(name.to_owned()));
    }
    self.set_dependency(name, component);
    debug!(component = name, "registered component");
    Ok(())
  }

  // --- Definition ---

  /// Defines `name` with the construct strategy: `f` builds a new value from
  /// the resolved `deps` and that value becomes the component.
  fn define<T, F>(&self, name: &str, deps: &[&str], f: F)
  where
    Self: Sized,
    T: Any + Send + Sync,
    F: Fn(&Args) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
  {
    self.set_definition(name, Definition::constructor(name, deps, f));
  }

  /// Defines `name` with the invoke strategy: `f` returns the component itself.
  fn define_factory<F>(&self, name: &str, deps: &[&str], f: F)
  where
    Self: Sized,
    F: Fn(&Args) -> std::result::Result<Component, BoxError> + Send + Sync + 'static,
  {
    self.set_definition(name, Definition::factory(name, deps, f));
  }

  /// Defines `name` with an explicit strategy and an untyped build function.
  fn define_with<F>(&self, name: &str, deps: &[&str], strategy: Strategy, f: F)
  where
    Self: Sized,
    F: Fn(&Args) -> std::result::Result<Box<dyn Any + Send + Sync>, BoxError> + Send + Sync + 'static,
  {
    let build_fn: BuildFn = Arc::new(f);
    self.set_definition(name, Definition::new(name, deps, strategy, build_fn));
  }

  // --- Resolution ---

  /// Resolves `name` in a fresh resolution context.
  fn resolve(&self, name: &str) -> Result<Component> {
    self.resolve_in(name, &mut ResolutionContext::new())
  }

  /// Resolves `name`, building and caching it (and its dependencies) if needed.
  ///
  /// `context` must be shared by every resolution of one call tree so that a
  /// name entered twice is reported as a cycle.
  fn resolve_in(&self, name: &str, context: &mut ResolutionContext) -> Result<Component> {
    if let Err(err) = context.enter(name) {
      warn!(component = name, "cyclic dependency detected");
      return Err(err);
    }

    if let Some(existing) = self.get_dependency(name) {
      trace!(component = name, "resolved from cache");
      return Ok(existing);
    }

    trace!(component = name, "resolving");
    self
      .create(name, context)
      .map_err(|source| InjectError::ResolutionFailed {
        name: name.to_owned(),
        source: Box::new(source),
      })
  }

  /// Builds `name` and registers the result.
  fn create(&self, name: &str, context: &mut ResolutionContext) -> Result<Component> {
    let component = self.build_in(name, context)?;
    self.register(name, Arc::clone(&component))?;
    Ok(component)
  }

  /// Builds a fresh component for `name` without registering it.
  fn build(&self, name: &str) -> Result<Component> {
    self.build_in(name, &mut ResolutionContext::new())
  }

  fn build_in(&self, name: &str, context: &mut ResolutionContext) -> Result<Component> {
    let definition = self
      .get_definition(name)
      .ok_or_else(|| InjectError::UnknownComponent(name.to_owned()))?;

    let (deps, build_fn, context) = definition.build_arguments(context);
    let injected = self.inject(&deps, build_fn, context)?;

    let component =
      definition
        .instantiate(&injected)
        .map_err(|source| InjectError::InstantiationFailed {
          name: name.to_owned(),
          source,
        })?;
    debug!(
      component = name,
      strategy = %definition.strategy(),
      deps = deps.len(),
      "instantiated component"
    );

    self.emit(Event::Created, &component);
    Ok(component)
  }

  /// Resolves `deps` in order and binds them to `build_fn`.
  fn inject(
    &self,
    deps: &[String],
    build_fn: BuildFn,
    context: &mut ResolutionContext,
  ) -> Result<Injected> {
    let mut resolved = Vec::with_capacity(deps.len());
    for dep in deps {
      match self.resolve_in(dep, context) {
        Ok(component) => resolved.push(component),
        Err(source) => {
          return Err(InjectError::InjectionFailed {
            deps: deps.to_vec(),
            registered: self.dependency_names(),
            source: Box::new(source),
          })
        }
      }
    }
    Ok(Injected::new(resolved, build_fn))
  }

  /// Resolves `name` and downcasts it to `T`.
  fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>>
  where
    Self: Sized,
  {
    self
      .resolve(name)?
      .downcast::<T>()
      .map_err(|_| InjectError::TypeMismatch {
        name: name.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Subscribes `f` to [`Event::Created`].
  fn on_created<F>(&self, f: F)
  where
    Self: Sized,
    F: Fn(&Component) + Send + Sync + 'static,
  {
    self.on(Event::Created, Arc::new(f));
  }

  // --- Layering ---

  /// Returns a view of `self` in which `overrides` shadow the named entries.
  ///
  /// `self` is not modified. Components built through the view are still
  /// registered on `self`.
  fn merge_dependencies<I, K>(&self, overrides: I) -> OverrideLayer<'_>
  where
    Self: Sized,
    I: IntoIterator<Item = (K, Override)>,
    K: Into<String>,
  {
    OverrideLayer::new(self, overrides)
  }
}
