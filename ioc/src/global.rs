//! The global container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container.
///
/// Useful when definitions are registered from many places in an application
/// and resolved elsewhere.
///
/// # Examples
///
/// ```
/// use fibre_injector::{global, Injector};
///
/// global().define("greeting", &[], |_| Ok(String::from("Hello from global!")));
/// let greeting = global().get::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "Hello from global!");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
