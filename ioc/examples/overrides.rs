use fibre_injector::{Container, Injector, Override};

struct Clock {
  now: u64,
}

struct Greeter {
  greeting: String,
}

fn main() {
  let container = Container::new();
  container.define("clock", &[], |_| Ok(Clock { now: 1_700_000_000 }));
  container.define("greeter", &["clock"], |args| {
    let clock = args.get::<Clock>(0)?;
    Ok(Greeter {
      greeting: format!("Hello at {}", clock.now),
    })
  });

  // A test-style view: "clock" is frozen, everything else comes from the base.
  let frozen = container.merge_dependencies([("clock", Override::instance(Clock { now: 0 }))]);

  let greeter = frozen.get::<Greeter>("greeter").expect("greeter resolves");
  println!("{}", greeter.greeting);
  assert_eq!(greeter.greeting, "Hello at 0");

  // The base never built its own clock, but it now caches the greeter.
  println!("Base instances: {:?}", container.dependency_names());
  println!("Layer instances: {:?}", frozen.dependency_names());
  assert!(!container.has_dependency("clock"));
  assert!(container.has_dependency("greeter"));
}
