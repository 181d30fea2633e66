// src/main.rs
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use voteviz_backend::routes;
use voteviz_backend::store::VoteStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voteviz_backend=debug,info")),
        )
        .init();

    // Get the port from the environment (default to 3030 for local development)
    let port = env::var("PORT").unwrap_or_else(|_| "3030".to_string());
    let port = port.parse::<u16>().expect("PORT must be a valid number");

    // The store lives for the whole process; every handler shares this handle.
    let store = Arc::new(VoteStore::new());
    let app = routes::create_routes(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "voteviz backend listening");
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}
