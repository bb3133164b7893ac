// ioc/tests/layered.rs

//! Tests for override layers created with `merge_dependencies`.

use fibre_injector::{component, Container, Definition, InjectError, Injector, Override};
use pretty_assertions::assert_eq;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct Clock {
  now: u64,
}

struct Scheduler {
  clock: Arc<Clock>,
}

fn base_container(clock_builds: &Arc<AtomicUsize>) -> Container {
  let container = Container::new();
  let counter = Arc::clone(clock_builds);
  container.define("clock", &[], move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(Clock { now: 1_000 })
  });
  container.define("scheduler", &["clock"], |args| {
    Ok(Scheduler {
      clock: args.get::<Clock>(0)?,
    })
  });
  container.define("name", &[], |_| Ok(String::from("base")));
  container
}

// --- Layer Tests ---

#[test]
fn test_override_instance_shadows_base_definition() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let layer = base.merge_dependencies([("clock", Override::instance(Clock { now: 42 }))]);

  let clock = layer.get::<Clock>("clock").unwrap();

  assert!(layer.is_overridden("clock"));
  assert!(!layer.is_overridden("scheduler"));
  assert_eq!(*clock, Clock { now: 42 });
  assert_eq!(clock_builds.load(Ordering::SeqCst), 0);
  assert!(!base.has_dependency("clock"));
}

#[test]
fn test_dependents_built_through_layer_see_override_and_land_on_base() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let fake = component(Clock { now: 7 });
  let layer = base.merge_dependencies([("clock", Override::Instance(Arc::clone(&fake)))]);

  let scheduler = layer.get::<Scheduler>("scheduler").unwrap();

  assert_eq!(scheduler.clock.now, 7);
  assert_eq!(clock_builds.load(Ordering::SeqCst), 0);
  // The scheduler became a permanent instance of the base.
  assert!(base.has_dependency("scheduler"));
  assert!(!base.has_dependency("clock"));
  let from_base = base.get::<Scheduler>("scheduler").unwrap();
  assert!(Arc::ptr_eq(&scheduler, &from_base));
}

#[test]
fn test_other_names_resolve_as_on_base() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let layer = base.merge_dependencies([("clock", Override::instance(Clock { now: 42 }))]);

  let from_layer = layer.get::<String>("name").unwrap();
  let from_base = base.get::<String>("name").unwrap();

  assert_eq!(*from_layer, "base");
  assert!(Arc::ptr_eq(&from_layer, &from_base));
}

#[test]
fn test_base_cache_is_untouched_by_layer() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let real = base.get::<Clock>("clock").unwrap();

  let layer = base.merge_dependencies([("clock", Override::instance(Clock { now: 3 }))]);
  assert_eq!(layer.get::<Clock>("clock").unwrap().now, 3);

  let again = base.get::<Clock>("clock").unwrap();
  assert!(Arc::ptr_eq(&real, &again));
  assert_eq!(again.now, 1_000);
  assert_eq!(clock_builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_override_definition_is_used_for_building() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let layer = base.merge_dependencies([(
    "name",
    Override::from(Definition::constructor("name", &[], |_| Ok(String::from("layer")))),
  )]);

  let name = layer.get::<String>("name").unwrap();

  assert_eq!(*name, "layer");
  // Writes go to the base, so the base now serves the layer-built value.
  assert_eq!(*base.get::<String>("name").unwrap(), "layer");
}

#[test]
fn test_writes_delegate_to_base() {
  let base = Container::new();
  let layer = base.merge_dependencies(Vec::<(String, Override)>::new());

  layer.set_dependency("port", component(8080_u16));
  layer.define("host", &[], |_| Ok(String::from("localhost")));

  assert!(base.has_dependency("port"));
  assert!(base.has_definition("host"));
  assert_eq!(*base.get::<String>("host").unwrap(), "localhost");
}

#[test]
fn test_register_refuses_shadowed_instance() {
  let base = Container::new();
  let layer = base.merge_dependencies([("port", Override::instance(1_u16))]);

  let err = layer.register("port", component(2_u16)).unwrap_err();

  assert!(matches!(err, InjectError::AlreadyRegistered(ref n) if n == "port"));
  assert!(!base.has_dependency("port"));
}

#[test]
fn test_dependency_names_concatenate_with_duplicates() {
  let base = Container::new();
  base.register("clock", component(Clock { now: 1 })).unwrap();
  let layer = base.merge_dependencies([("clock", Override::instance(Clock { now: 2 }))]);

  // A name cached on the base and overridden on the layer is listed twice.
  assert_eq!(layer.dependency_names(), vec!["clock", "clock"]);
}

#[test]
fn test_layers_share_base_event_stream() {
  let base = Container::new();
  base.define("value", &[], |_| Ok(1_u8));
  let created = Arc::new(AtomicUsize::new(0));

  let first = base.merge_dependencies(Vec::<(String, Override)>::new());
  let second = base.merge_dependencies(Vec::<(String, Override)>::new());
  let counter = Arc::clone(&created);
  first.on_created(move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
  });

  second.resolve("value").unwrap();
  base.build("value").unwrap();

  assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[test]
fn test_nested_layers() {
  let clock_builds = Arc::new(AtomicUsize::new(0));
  let base = base_container(&clock_builds);
  let outer = base.merge_dependencies([("name", Override::instance(String::from("outer")))]);
  let inner = outer.merge_dependencies([("clock", Override::instance(Clock { now: 5 }))]);

  assert!(inner.base().get_definition("scheduler").is_some());
  assert!(inner.base().get_dependency("name").is_some());
  assert_eq!(*inner.get::<String>("name").unwrap(), "outer");
  assert_eq!(inner.get::<Scheduler>("scheduler").unwrap().clock.now, 5);
  assert!(base.has_dependency("scheduler"));
  assert_eq!(clock_builds.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cycle_detection_through_layer() {
  let base = Container::new();
  base.define("a", &["b"], |_| Ok(()));
  base.define("b", &["a"], |_| Ok(()));
  let layer = base.merge_dependencies(Vec::<(String, Override)>::new());

  let err = layer.resolve("a").unwrap_err();

  assert!(err.is_cyclic());
}
