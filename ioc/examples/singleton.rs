use fibre_injector::{global, resolve, Injector};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple component that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::new("fibre_injector=trace"))
    .init();

  global().on_created(|_| println!("A component was created."));

  // `resolve` caches, so this build function runs once.
  global().define("tracker", &[], |_| {
    println!("Creating RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  });

  println!("--- Resolving ---");
  let r1 = resolve!(RequestTracker, "tracker");
  let r2 = resolve!(RequestTracker, "tracker");
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", r1.id, r2.id);
  assert_eq!(r1.id, 0);
  assert!(Arc::ptr_eq(&r1, &r2), "Resolved components should be identical");

  // `build` never touches the cache and always runs the build function.
  println!("--- Building ---");
  let b1 = global().build("tracker").expect("tracker is defined");
  let b2 = global().build("tracker").expect("tracker is defined");
  let ids = [&b1, &b2].map(|c| c.downcast_ref::<RequestTracker>().map(|t| t.id));
  println!("Built IDs: {:?}", ids);
  assert_eq!(ids, [Some(1), Some(2)]);
}
