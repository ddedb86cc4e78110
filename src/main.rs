use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use finboard::config::{self, AppConfig};
use finboard::database::{DatabaseManager, MemoryUserStore, PgUserStore, UserStore};
use finboard::rpc::{user::ListUsers, Procedure, RpcContext};
use finboard::{build_router, AppState};

#[derive(Parser)]
#[command(name = "finboard", version, about = "Financial management web app")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the web server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides FINBOARD_PORT / PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides FINBOARD_BIND)")]
        bind: Option<String>,
    },

    #[command(about = "Print every user, newest first, as JSON")]
    Users,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and AUTH_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finboard=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = config::config().clone();
    tracing::info!("Starting Finboard in {:?} mode", config.environment);

    match cli.command.unwrap_or(Command::Serve { port: None, bind: None }) {
        Command::Serve { port, bind } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            serve(config).await
        }
        Command::Users => print_users(&config).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", config.server.bind, config.server.port);
    let store = open_store(&config).await?;
    let state = AppState::new(config, store).context("invalid auth configuration")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Finboard listening on http://{}", bind_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn print_users(config: &AppConfig) -> anyhow::Result<()> {
    let ctx = RpcContext::new(open_store(config).await?, None);
    let users = ListUsers.call(&ctx, ()).await?;
    let json: Value = serde_json::to_value(users)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    if config.database.url.is_none() {
        tracing::warn!("DATABASE_URL not set, serving users from an in-memory store");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to prepare users table")?;
    Ok(Arc::new(PgUserStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
