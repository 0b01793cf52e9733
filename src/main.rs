use std::sync::Arc;

use vinoserve::config::{load_config, print_schema};
use vinoserve::startup;
use vinoserve::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    // `vinoserve --schema` prints the config JSON schema and exits.
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = Arc::new(load_config());
    init_logging(&config.logging);

    if let Err(e) = startup::run(config).await {
        tracing::error!("Service failed to start: {}", e);
        std::process::exit(1);
    }
}
