//! Public macros for typed component resolution.

/// Resolves a component from the global container, downcast to `$type`.
///
/// # Panics
///
/// Panics with the full error chain if the component cannot be resolved or
/// has another type. Use [`maybe_resolve!`] for a non-panicking version.
///
/// # Examples
///
/// ```
/// use fibre_injector::{global, resolve, Injector};
///
/// global().define("answer", &[], |_| Ok(42_u32));
///
/// let answer = resolve!(u32, "answer");
/// assert_eq!(*answer, 42);
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty, $name:expr) => {
    $crate::resolve_from!($crate::global(), $type, $name)
  };
}

/// Resolves a component from the given injector, downcast to `$type`.
///
/// # Panics
///
/// Panics with the full error chain on failure.
#[macro_export]
macro_rules! resolve_from {
  ($injector:expr, $type:ty, $name:expr) => {{
    use $crate::Injector as _;
    let name: &str = $name;
    match $injector.get::<$type>(name) {
      Ok(component) => component,
      Err(err) => panic!(
        "Failed to resolve required component '{}' as {}: {}",
        name,
        std::any::type_name::<$type>(),
        err.report()
      ),
    }
  }};
}

/// Resolves a component from the global container, returning `None` on any
/// failure.
#[macro_export]
macro_rules! maybe_resolve {
  ($type:ty, $name:expr) => {
    $crate::maybe_resolve_from!($crate::global(), $type, $name)
  };
}

/// Resolves a component from the given injector, returning `None` on any
/// failure.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($injector:expr, $type:ty, $name:expr) => {{
    use $crate::Injector as _;
    $injector.get::<$type>($name).ok()
  }};
}
