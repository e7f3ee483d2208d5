//! Chat backend entry point.
//!
//! Wires the process together: configuration, tracing, the Redis-backed
//! presence registry, the topic hub, the chat handlers, and the axum
//! WebSocket server.

use std::sync::Arc;

use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use chatpp_backend::adapters::websocket::{websocket_router, WsState};
use chatpp_backend::adapters::{RedisPresenceRegistry, TopicHub};
use chatpp_backend::application::handlers::chat::ChatHandlers;
use chatpp_backend::config::AppConfig;
use chatpp_backend::ports::PresenceRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        presence_key = %config.redis.presence_key,
        "starting chat backend"
    );

    // Presence registry: one shared Redis set, constructed once and passed
    // explicitly into the handlers.
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;
    let registry: Arc<dyn PresenceRegistry> =
        Arc::new(RedisPresenceRegistry::new(redis_conn, &config.redis));

    let hub = Arc::new(TopicHub::with_default_capacity());
    let handlers = Arc::new(ChatHandlers::new(registry, hub.clone()));

    let app = websocket_router()
        .with_state(WsState::new(handlers, hub))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        // No origins configured: development default.
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}
