// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::editor_service::EditorService;
use crate::application::template_catalog::TemplateCatalog;
use crate::infrastructure::config::{load_server_config, load_templates_config};
use crate::infrastructure::memory_repository::InMemoryDashboardRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (rejects inconsistent canvas limits)
    let server_config = load_server_config()?;
    let templates_config = load_templates_config(&server_config.server.templates_path)?;

    // The template catalog is loaded once and immutable afterwards
    let catalog = TemplateCatalog::new(templates_config.templates);
    tracing::info!(templates = catalog.len(), "Widget template catalog loaded");

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemoryDashboardRepository::new());

    // Create services (application layer)
    let editor_service = EditorService::new(
        repository,
        catalog,
        server_config.canvas,
        server_config.sessions.idle_ttl(),
    );

    // Evict sessions abandoned without a discard
    let _sweeper = editor_service.spawn_idle_sweeper(server_config.sessions.sweep_interval());

    // Create application state
    let state = Arc::new(AppState { editor_service });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr = server_config.server.socket_addr()?;
    tracing::info!(%addr, "Starting dashboard-designer service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
