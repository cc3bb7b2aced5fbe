use axum::Router;
use motoloop::cache::{MemoryTrackCache, TrackCache};
use motoloop::config::Config;
use motoloop::constants::ORS_DIRECTIONS_BASE_URL;
use motoloop::models::{BikeCatalog, TemplateCatalog};
use motoloop::services::directions::{AuthMode, DirectionsProvider, OpenRouteServiceClient};
use motoloop::services::route_generator::RouteGenerator;
use motoloop::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motoloop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Motoloop API server");
    tracing::info!("Configuration loaded successfully");

    let directions_cfg = &config.directions;
    let timeout = Duration::from_secs(directions_cfg.timeout_secs);
    let directions_client = if let Some(ref base_url) = directions_cfg.base_url {
        tracing::info!("Using directions proxy at {}", base_url);
        OpenRouteServiceClient::with_config(
            directions_cfg.api_key.clone(),
            base_url.clone(),
            directions_cfg.profile.clone(),
            AuthMode::BearerHeader,
            timeout,
        )?
    } else {
        OpenRouteServiceClient::with_config(
            directions_cfg.api_key.clone(),
            ORS_DIRECTIONS_BASE_URL.to_string(),
            directions_cfg.profile.clone(),
            AuthMode::ApiKeyHeader,
            timeout,
        )?
    };
    let directions: Arc<dyn DirectionsProvider> = Arc::new(directions_client);

    tracing::info!(
        "Track cache: in-memory, ttl {}s, {} entries max",
        config.track_cache_ttl,
        config.track_cache_max_entries
    );
    let cache: Arc<dyn TrackCache> = Arc::new(MemoryTrackCache::new(
        config.track_cache_ttl,
        config.track_cache_max_entries,
    ));

    let route_generator = RouteGenerator::new(
        TemplateCatalog::default(),
        BikeCatalog::default(),
        directions,
        Some(cache),
    );

    // Create application state
    let state = Arc::new(AppState { route_generator });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", motoloop::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
