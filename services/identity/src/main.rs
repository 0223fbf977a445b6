use sea_orm::Database;
use tracing::info;

use girder_identity::config::IdentityConfig;
use girder_identity::router::build_router;
use girder_identity::state::AppState;

#[tokio::main]
async fn main() {
    girder_core::tracing::init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
