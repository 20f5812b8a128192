use crate::apis::collect_events;
use crate::common::error::Result;
use crate::common::types::{Event, EventProvider};
use crate::config::ServerConfig;
use crate::templates::render_events_page;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Shared state: the providers every request scrapes
#[derive(Clone)]
pub struct AppState {
    providers: Arc<Vec<Box<dyn EventProvider>>>,
}

impl AppState {
    pub fn new(providers: Vec<Box<dyn EventProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}

/// Scrape every provider and render the combined listing
async fn events_page(State(state): State<AppState>) -> Response {
    let events = collect_events(&state.providers).await;

    match render_events_page(events) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render events page: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error executing template: {e}"),
            )
                .into_response()
        }
    }
}

async fn events_json(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(collect_events(&state.providers).await)
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "nachtleven",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_endpoint() -> Response {
    match crate::metrics::render() {
        Some(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}

/// Create the HTTP router with all routes
pub fn create_server(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(events_page))
        .route("/events.json", get(events_json))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .with_state(state)
}

/// Bind the configured address and serve until the process exits
pub async fn start_server(state: AppState, config: &ServerConfig, addr: SocketAddr) -> Result<()> {
    let app = create_server(state, config);
    let listener = TcpListener::bind(addr).await?;

    tokio::spawn(async {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            crate::metrics::run_upkeep();
        }
    });

    info!("Server starting on http://{}", listener.local_addr()?);
    println!("🚀 Server starting on http://localhost:{}", addr.port());

    axum::serve(listener, app).await?;
    Ok(())
}
