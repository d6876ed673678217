//! Payroll API server daemon.
//!
//! Starts the HTTP service backed by the in-memory schema-validated
//! store. All state is process-lifetime only; a restart starts empty
//! apart from the seeded demo user.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_api::controller::{salary::SalaryController, shared_store, user::UserController};
use payroll_api::transport::http::{create_router, AppState};
use payroll_api::ServerConfig;

/// Payroll API server
#[derive(Parser, Debug)]
#[command(
    name = "payroll-api",
    version,
    about = "Salary-record CRUD and statistics API over an in-memory store"
)]
struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "PAYROLL_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short = 'p', long, default_value_t = 3000, env = "PAYROLL_PORT")]
    port: u16,

    /// Secret for signing bearer tokens
    #[arg(long, default_value = "dev-secret-change-me", env = "PAYROLL_JWT_SECRET")]
    jwt_secret: String,

    /// Demo credential seeded at startup
    #[arg(long, default_value = "dummy@clipboardhealth.com", env = "PAYROLL_SEED_EMAIL")]
    seed_email: String,

    #[arg(long, default_value = "dummy", env = "PAYROLL_SEED_PASSWORD")]
    seed_password: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "PAYROLL_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        jwt_secret: args.jwt_secret,
        seed_user_email: args.seed_email,
        seed_user_password: args.seed_password,
    };

    run_server(config).await
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(format!("payroll_api={level},mem_db={level},tower_http=warn"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn run_server(config: ServerConfig) -> Result<()> {
    let store = shared_store();
    let salary = Arc::new(SalaryController::new(store.clone()).await);
    let users = Arc::new(UserController::new(store, &config.jwt_secret).await);

    users
        .add_user(&config.seed_user_email, &config.seed_user_password)
        .await?;
    info!(email = %config.seed_user_email, "seeded demo user");

    let state = AppState { salary, users };
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %config.socket_addr(), "payroll API listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
