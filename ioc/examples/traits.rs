use fibre_injector::{resolve_from, Container, Injector};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let container = Container::new();

  // The component stored under "logger" is an `Arc<dyn Logger>`.
  container.define("logger", &[], |_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>));

  // ReportService never creates its logger, it receives it as argument 0.
  container.define("reports", &["logger"], |args| {
    Ok(ReportService {
      logger: (*args.get::<Arc<dyn Logger>>(0)?).clone(),
    })
  });

  println!("Resolving the high-level service...");
  let report_service = resolve_from!(container, ReportService, "reports");

  println!("Using the service...");
  report_service.generate_report();
}
