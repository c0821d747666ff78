//! Slainte chat widget server.

use std::sync::Arc;

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use dotenvy::dotenv;
use slainte::config::AppConfig;
use slainte::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load()?;
    telemetry::init(config.logging.json);

    tracing::info!(
        name: "config.loaded",
        address = %config.bind_addr(),
        title = %config.widget.title,
        "Configuration loaded"
    );

    server::start_server(Arc::new(config)).await
}
