//! # Fibre Injector
//!
//! A named-component dependency injector for Rust.
//!
//! Components are described by [`Definition`]s: a name, an ordered list of
//! dependency names and a build function. Nothing is built until it is
//! resolved. Resolving a name builds its dependencies first (depth first, in
//! declaration order), caches every built component, and reports circular
//! dependencies instead of recursing forever.
//!
//! ## Core Concepts
//!
//! - **Container**: owns the instance cache and the definitions.
//! - **Strategy**: `Construct` moves the build function's result into a new
//!   component, `Invoke` uses the component the build function returns.
//! - **Resolution context**: the set of names in flight for one resolution
//!   tree, used for cycle detection.
//! - **Override layer**: [`Injector::merge_dependencies`] returns a view that
//!   shadows selected names without touching the base container.
//! - **Events**: listeners subscribed to [`Event::Created`] see every freshly
//!   built component.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_injector::{Container, Injector};
//! use std::sync::Arc;
//!
//! struct Logger {
//!   level: &'static str,
//! }
//!
//! struct Service {
//!   logger: Arc<Logger>,
//! }
//!
//! let container = Container::new();
//! container.define("logger", &[], |_| Ok(Logger { level: "info" }));
//! container.define("service", &["logger"], |args| {
//!   Ok(Service { logger: args.get::<Logger>(0)? })
//! });
//!
//! let service = container.get::<Service>("service").unwrap();
//! let logger = container.get::<Logger>("logger").unwrap();
//!
//! assert_eq!(service.logger.level, "info");
//! assert!(Arc::ptr_eq(&service.logger, &logger));
//! ```

mod container;
mod core;
mod definition;
mod error;
mod events;
mod global;
mod injector;
mod layered;
mod macros;

pub use crate::core::{component, BoxError, Component, ResolutionContext};
pub use container::{Container, ContainerBuilder};
pub use definition::{Args, BuildFn, Definition, Injected, Strategy};
pub use error::{ArgumentError, InjectError, Result};
pub use events::{Event, Events, Listener};
pub use global::global;
pub use injector::Injector;
pub use layered::{Override, OverrideLayer};
