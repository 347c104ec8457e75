//! Production Scheduling - Axum Server
//!
//! Run with: cargo run
//! Serves the scheduling API on http://localhost:5000

use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use production_scheduling::api;
use production_scheduling::solver::SolverConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("production_scheduling=info".parse().unwrap()),
        )
        .init();

    let state = Arc::new(api::AppState::new(SolverConfig::default()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    println!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
