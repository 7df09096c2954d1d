mod backend;
mod config;
mod page;
mod routes;
mod state;

use config::{AppConfig, BackendMode};
use state::{AppState, BackendHandle};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");

    let backend = match &config.backend {
        BackendMode::Rest(rest) => {
            let client = backend::RestBackend::new(rest).expect("backend client init failed");
            tracing::info!(url = %rest.url, "using hosted backend");
            BackendHandle::Rest(client)
        }
        BackendMode::Memory(seed) => {
            tracing::warn!(skills = seed.skills.len(), "using in-memory backend; data is lost on restart");
            BackendHandle::memory(seed).await
        }
    };
    let state = AppState::new(backend);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "skill waiting list listening");
    axum::serve(listener, app).await.expect("server failed");
}
