use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use leadboard_api::{build_router, AppState};
use leadboard_core::repositories::Repositories;
use leadboard_core::services::AuthService;
use leadboard_infrastructure::{create_pool, postgres_repositories, run_migrations, InMemoryStore};
use leadboard_security::JwtService;
use leadboard_shared::config::{AppConfig, StorageBackend};

/// Secret shipped in config/default.toml.
const DEV_JWT_SECRET: &str = "change-me-in-production";

#[derive(Parser)]
#[command(name = "leadboard-server")]
#[command(about = "Kanban-style lead tracking API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending schema migrations and exit
    Migrate,
    /// Create a login account
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Company the account's tokens are scoped to
        #[arg(long)]
        company_uuid: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes file output on exit
    let _log_guard = leadboard_shared::telemetry::init_telemetry(&config.log)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(&config).await,
        Commands::CreateUser { username, password, company_uuid } => {
            let repos = open_store(&config, false).await?;
            let auth = AuthService::new(repos.users.clone(), Arc::new(jwt_service(&config)));
            let user = auth.create_user(&username, &password, company_uuid).await?;
            info!("Created user {} ({})", user.username, user.uuid);
            Ok(())
        }
    }
}

fn jwt_service(config: &AppConfig) -> JwtService {
    JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    )
}

async fn open_store(config: &AppConfig, migrate: bool) -> anyhow::Result<Repositories> {
    match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Ok(InMemoryStore::new().repositories())
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .context("Failed to connect to database")?;
            info!("Database connection established.");

            if migrate {
                run_migrations(&pool).await.context("Failed to run migrations")?;
            }
            Ok(postgres_repositories(pool))
        }
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.backend != StorageBackend::Postgres {
        anyhow::bail!("Migrations only apply to the postgres backend");
    }
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("{} starting ({})", config.app.name, config.app.env);
    if config.is_production() && config.jwt.secret == DEV_JWT_SECRET {
        anyhow::bail!("jwt.secret must be overridden in production");
    }

    let repos = open_store(&config, config.database.run_migrations).await?;
    let state = AppState::new(&repos, Arc::new(jwt_service(&config)));

    if let Some(bootstrap) = &config.bootstrap {
        state
            .services
            .auth
            .ensure_user(&bootstrap.username, &bootstrap.password, bootstrap.company_uuid.clone())
            .await
            .context("Failed to provision bootstrap user")?;
        info!("Bootstrap user ensured: {}", bootstrap.username);
    }

    let app = build_router(state, &config.app.cors_origins);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
