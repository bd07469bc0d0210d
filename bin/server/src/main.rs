use lecture_bot_conversation::{Dispatcher, SystemClock};
use lecture_bot_server::{AppState, config::ServerConfig, db::SqlCourseCatalog, routes};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        db_host = %config.db_host,
        db_name = %config.db_name,
        "Loaded configuration"
    );

    // Connections are opened on first use so the webhook keeps answering
    // (with empty results) while the database is down.
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_lazy_with(config.connect_options());

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::warn!(error = %e, "Failed to run migrations, continuing without them");
    }

    let catalog = Arc::new(SqlCourseCatalog::new(db_pool));
    let dispatcher = Dispatcher::new(catalog, Arc::new(SystemClock));
    let app = routes::router(Arc::new(AppState::new(dispatcher)));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl-C - shutting down");
}
