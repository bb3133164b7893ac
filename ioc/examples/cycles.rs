use fibre_injector::{Container, Injector};

fn main() {
  let container = Container::new();
  container.define("a", &["b"], |_| Ok(()));
  container.define("b", &["c"], |_| Ok(()));
  container.define("c", &["a"], |_| Ok(()));

  match container.resolve("a") {
    Ok(_) => unreachable!("a -> b -> c -> a is a cycle"),
    Err(err) => {
      assert!(err.is_cyclic());
      println!("{}", err.report());
    }
  }
}
