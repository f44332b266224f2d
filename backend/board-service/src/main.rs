use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use board_service::config::SearchBackend;
use board_service::db::{
    CommentRepository, DocumentStore, ElasticsearchStore, InMemoryStore, PostRepository,
};
use board_service::handlers::{self, HealthState};
use board_service::services::{CommentService, PostService};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Board Service
///
/// Posts and comments stored in a document index.
///
/// # Routes
///
/// - `/api/v1/posts/*` - Create, read, update, delete, list and search posts
/// - `/api/v1/posts/{post_id}/comments/*` - The same for the comments of a post
/// - `/api/v1/health`, `/api/v1/health/live` - Diagnostics
///
/// # Deployment
///
/// Listens on port 8080 (configurable via BOARD_SERVICE_PORT). The document store is
/// Elasticsearch unless SEARCH_BACKEND=memory.
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,elasticsearch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match board_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting board-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store: Arc<dyn DocumentStore> = match config.search.backend {
        SearchBackend::Elasticsearch => {
            let es = ElasticsearchStore::new(
                &config.search.url,
                Duration::from_millis(config.search.request_timeout_ms),
                config.search.refresh_on_write,
            )
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to create Elasticsearch client: {e}"),
                )
            })?;
            Arc::new(es)
        }
        SearchBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Arc::new(InMemoryStore::new())
        }
    };

    if let Err(e) = store.ping().await {
        tracing::error!("Document store health check failed - {}", e);
        tracing::error!(
            "   Fix: Ensure Elasticsearch is running and accessible at {}",
            config.search.url
        );
        return Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!("Document store initialization failed: {}", e),
        ));
    }

    let post_repo = PostRepository::new(store.clone(), config.search.post_index.clone());
    let comment_repo = CommentRepository::new(store.clone(), config.search.comment_index.clone());

    for result in [post_repo.ensure_index().await, comment_repo.ensure_index().await] {
        result.map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to ensure document indices: {e}"),
            )
        })?;
    }

    let post_service = PostService::new(post_repo);
    let comment_service = CommentService::new(comment_repo);

    let health_state = web::Data::new(HealthState::new(
        store.clone(),
        post_service.clone(),
        comment_service.clone(),
    ));
    let post_data = web::Data::new(post_service);
    let comment_data = web::Data::new(comment_service);

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(post_data.clone())
            .app_data(comment_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)?
    .run()
    .await
}
