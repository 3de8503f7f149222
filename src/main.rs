mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::Router;

use std::sync::Arc;

use config::Config;
use handlers::rest;
use repository::Repository;
use service::NoteService;

use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let config = Config::from_env();

    // Repository creation and schema init
    let repo = Repository::new(&config.db_path).unwrap_or_else(|e| {
        tracing::error!("Failed to prepare database directory: {e}");
        panic!("failed to prepare database directory: {e}");
    });

    repo.init_schema().unwrap_or_else(|e| {
        tracing::error!("Failed to initialize database schema: {e}");
        panic!("failed to initialize database schema: {e}");
    });
    tracing::info!("Database initialized at {}", config.db_path.display());

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let app = rest::api_router(service)
        .merge(static_router(&config))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", config.bind_addr);
            panic!("failed to bind {}: {e}", config.bind_addr);
        });

    // Starting router
    tracing::info!("Started listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}

// Index and favicon are served from the static root; asset directories are
// mounted only when they exist on disk at startup.
fn static_router(config: &Config) -> Router {
    let mut router = Router::new()
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .route_service(
            "/favicon.svg",
            ServeFile::new(config.static_dir.join("favicon.svg")),
        );

    for name in ["styles", "scripts", "screenshots"] {
        let dir = config.static_dir.join(name);
        if dir.is_dir() {
            router = router.nest_service(&format!("/{name}"), ServeDir::new(dir));
        }
    }

    router
}
