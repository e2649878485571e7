use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use database::StudentStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
}

/// Builds the router with all routes and middleware, without binding a socket.
pub fn app(store: Arc<dyn StudentStore>) -> Router {
    let app_state = Arc::new(AppState { store });
    // The console and any browser front-end are served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/students/:id",
            put(handlers::update_student).delete(handlers::delete_student),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Runs the API service on `addr` until the process is stopped.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(addr: SocketAddr, store: Arc<dyn StudentStore>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, store).await
}

/// Serves on an already-bound listener. Lets callers bind port 0 and read the
/// assigned address first.
pub async fn serve(listener: tokio::net::TcpListener, store: Arc<dyn StudentStore>) -> anyhow::Result<()> {
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(store)).await?;
    Ok(())
}
