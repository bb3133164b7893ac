use fibre_injector::{Component, Container, Event, InjectError, Injector};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct Logger {
  level: &'static str,
}

struct Service {
  logger: Arc<Logger>,
}

// --- Basic Tests ---

#[test]
fn test_resolving_undefined_name_fails() {
  let container = Container::new();

  let err = container.resolve("missing").unwrap_err();

  // resolve wraps the failure of create, whose cause is the missing definition.
  match &err {
    InjectError::ResolutionFailed { name, source } => {
      assert_eq!(name, "missing");
      assert!(matches!(**source, InjectError::UnknownComponent(ref n) if n == "missing"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(matches!(err.root_cause(), InjectError::UnknownComponent(_)));
}

#[test]
fn test_build_of_undefined_name_is_unknown_component() {
  let container = Container::new();

  let err = container.build("missing").unwrap_err();

  assert!(matches!(err, InjectError::UnknownComponent(ref n) if n == "missing"));
}

#[test]
fn test_resolve_twice_returns_cached_instance() {
  let container = Container::new();
  let builds = Arc::new(AtomicUsize::new(0));
  let created = Arc::new(AtomicUsize::new(0));

  let counter = Arc::clone(&builds);
  container.define("logger", &[], move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(Logger { level: "info" })
  });
  let events = Arc::clone(&created);
  container.on_created(move |_| {
    events.fetch_add(1, Ordering::SeqCst);
  });

  let first = container.resolve("logger").unwrap();
  let second = container.resolve("logger").unwrap();

  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(builds.load(Ordering::SeqCst), 1);
  assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_logger_and_service_example() {
  let container = Container::new();
  container.define_factory("logger", &[], |_| Ok(fibre_injector::component(Logger { level: "info" })));
  container.define("service", &["logger"], |args| {
    Ok(Service {
      logger: args.get::<Logger>(0)?,
    })
  });

  let service = container.get::<Service>("service").unwrap();
  let logger = container.get::<Logger>("logger").unwrap();
  let again = container.get::<Service>("service").unwrap();

  assert_eq!(*service.logger, Logger { level: "info" });
  assert!(Arc::ptr_eq(&service.logger, &logger));
  assert!(Arc::ptr_eq(&service, &again));
}

#[test]
fn test_build_does_not_register() {
  let container = Container::new();
  container.define("logger", &[], |_| Ok(Logger { level: "debug" }));

  let first = container.build("logger").unwrap();
  let second = container.build("logger").unwrap();

  assert!(!Arc::ptr_eq(&first, &second));
  assert!(!container.has_dependency("logger"));
  assert!(container.dependency_names().is_empty());
}

#[test]
fn test_build_registers_dependencies_but_not_the_target() {
  let container = Container::new();
  container.define("logger", &[], |_| Ok(Logger { level: "info" }));
  container.define("service", &["logger"], |args| {
    Ok(Service {
      logger: args.get::<Logger>(0)?,
    })
  });

  container.build("service").unwrap();

  assert!(container.has_dependency("logger"));
  assert!(!container.has_dependency("service"));
}

#[test]
fn test_register_twice_fails() {
  let container = Container::new();

  container.register("config", fibre_injector::component(1_u8)).unwrap();
  let err = container
    .register("config", fibre_injector::component(2_u8))
    .unwrap_err();

  assert!(matches!(err, InjectError::AlreadyRegistered(ref n) if n == "config"));
  assert_eq!(*container.get::<u8>("config").unwrap(), 1);
}

#[test]
fn test_redefine_replaces_definition_silently() {
  let container = Container::new();
  container.define("value", &[], |_| Ok(String::from("first")));
  container.define("value", &[], |_| Ok(String::from("second")));

  let value = container.get::<String>("value").unwrap();

  assert_eq!(*value, "second");
}

#[test]
fn test_redefine_after_resolution_keeps_cached_instance() {
  let container = Container::new();
  container.define("value", &[], |_| Ok(String::from("first")));
  let first = container.get::<String>("value").unwrap();

  container.define("value", &[], |_| Ok(String::from("second")));
  let again = container.get::<String>("value").unwrap();

  assert!(Arc::ptr_eq(&first, &again));
  assert_eq!(*again, "first");
}

#[test]
fn test_created_event_carries_component() {
  let container = Container::new();
  let seen = Arc::new(recorder::Seen::default());
  container.define("answer", &[], |_| Ok(42_u32));

  let sink = Arc::clone(&seen);
  container.on(
    Event::Created,
    Arc::new(move |component: &Component| {
      if let Some(value) = component.downcast_ref::<u32>() {
        sink.push(*value);
      }
    }),
  );

  container.resolve("answer").unwrap();
  container.resolve("answer").unwrap();

  assert_eq!(seen.values(), vec![42]);
}

#[test]
fn test_type_mismatch_is_reported() {
  let container = Container::new();
  container.define("answer", &[], |_| Ok(42_u32));

  let err = container.get::<String>("answer").unwrap_err();

  assert!(matches!(err, InjectError::TypeMismatch { ref name, .. } if name == "answer"));
}

mod recorder {
  use parking_lot::Mutex;

  #[derive(Default)]
  pub struct Seen(Mutex<Vec<u32>>);

  impl Seen {
    pub fn push(&self, value: u32) {
      self.0.lock().push(value);
    }

    pub fn values(&self) -> Vec<u32> {
      self.0.lock().clone()
    }
  }
}
