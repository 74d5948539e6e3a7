use mock_server::{MovieInput, Store};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// A few titles so a fresh server has something to browse.
fn demo_store() -> Store {
    let mut store = Store::new();
    store.add_movie(MovieInput {
        name: Some("Dune".to_string()),
        description: Some("A noble family becomes embroiled in a war for control of Arrakis.".to_string()),
        ..MovieInput::default()
    });
    store.add_movie(MovieInput {
        title: Some("Heat".to_string()),
        description: Some("A group of professional bank robbers and the detective on their trail.".to_string()),
        ..MovieInput::default()
    });
    store.add_account("Demo User", "demo@example.com", "demo123");
    store
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run_with(listener, demo_store()).await
}
