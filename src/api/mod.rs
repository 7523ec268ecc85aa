//! Web API module for tasklist

pub mod handlers;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use state::AppState;

/// Base route of the task collection
pub const TASKS_BASE: &str = "/api/tasks";

/// Create the task API router (mounted under [`TASKS_BASE`])
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/{id}/complete", patch(handlers::tasks::set_completion))
        .fallback(handlers::tasks::not_found)
}

/// Create the full router with static file serving
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest(TASKS_BASE, create_api_router())
        .with_state(state);

    // Add static file serving if directory is provided
    let router = if let Some(dir) = static_dir {
        let index_file = dir.join("index.html");
        let serve_dir = ServeDir::new(&dir).not_found_service(ServeFile::new(&index_file));
        router.fallback_service(serve_dir)
    } else {
        router
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// Start the web server (API + static files) on an already-bound listener
///
/// Returns once `shutdown` resolves and in-flight requests have finished.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: AppState,
    static_dir: Option<PathBuf>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = create_router(state, static_dir);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    static_dir: Option<PathBuf>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    tracing::info!(
        addr = %local,
        tasks_file = %state.tasks.store().path().display(),
        "tasklist server listening"
    );
    if static_dir.is_some() {
        println!("tasklist Web UI: http://{}", local);
    } else {
        println!("tasklist API server: http://{}{}", local, TASKS_BASE);
        println!("(No static files configured, API only mode)");
    }

    serve(listener, state, static_dir, shutdown).await
}
