//! Code Assist Relay Server
//!
//! HTTP relay that forwards code-assist prompts to a chat-completion API

use anyhow::{Context, Result};
use coderelay::config::Settings;
use coderelay::handlers::create_router;
use coderelay::models::relay::RouteKind;
use coderelay::utils::logging::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (and .env when present)
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("Server settings loaded: {}", coderelay::version_info());

    let addr = settings.bind_address();
    let app = create_router(settings).context("Failed to create router")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Code assist relay started on http://{}", addr);
    for route in RouteKind::ALL {
        info!("🔄 Relay endpoint: POST http://{}{}", addr, route.path());
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
