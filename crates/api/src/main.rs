use std::net::SocketAddr;
use std::sync::Arc;

use festival_api::auth::provision::provision_admin;
use festival_api::config::ServerConfig;
use festival_api::router::build_app_router;
use festival_api::state::AppState;
use festival_db::DbPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "festival_api=debug,festival_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        festival_year = config.festival_year,
        allow_bootstrap_login = config.allow_bootstrap_login,
        admin_configured = config.admin.is_some(),
        "Configuration loaded",
    );

    let pool = open_database(&config.database_url).await;

    match &config.admin {
        Some(admin) => {
            provision_admin(&pool, admin)
                .await
                .expect("Failed to provision the configured admin account");
        }
        None if config.allow_bootstrap_login => {
            tracing::warn!("ADMIN_USERNAME not set; the first login will become the admin account");
        }
        None => {}
    }

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Festival API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server terminated with an error");

    tracing::info!("Shut down cleanly");
}

/// Human-readable logs by default, JSON lines when `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect, verify, and migrate. Any failure aborts startup.
async fn open_database(url: &str) -> DbPool {
    let pool = festival_db::create_pool(url)
        .await
        .expect("Failed to open the database");
    festival_db::health_check(&pool)
        .await
        .expect("Database did not answer a health query");
    festival_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    tracing::info!("Database ready");
    pool
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl-C received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
