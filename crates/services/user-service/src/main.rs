//! User Service - register and list users on PostgreSQL or MySQL.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult, Backend, DatabaseConfig};
use domain::User;
use user_service_lib::cli::{Cli, Commands};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = UserServiceConfig::from_env();
    cli.database.apply(&mut config.database);
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::List { json } => list(&config.database, json).await,
        Commands::Register { names } => register(&config.database, &names).await,
        Commands::Migrate => migrate(&config.database).await,
        Commands::Schema => schema(config.database.backend),
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

async fn list(config: &DatabaseConfig, json: bool) -> AppResult<()> {
    let app = user_service_lib::bootstrap(config).await?;

    let users = app.users.list_users().await?;
    print_users(&users, json)
}

async fn register(config: &DatabaseConfig, names: &[String]) -> AppResult<()> {
    let app = user_service_lib::bootstrap(config).await?;

    // Registration failures are reported but do not stop the run
    for name in names {
        match app.users.register_user(name).await {
            Ok(()) => tracing::info!("Registered user {:?}", name),
            Err(e) => tracing::warn!(code = e.code(), "Failed to register user {:?}: {}", name, e),
        }
    }

    let users = app.users.list_users().await?;
    print_users(&users, false)
}

async fn migrate(config: &DatabaseConfig) -> AppResult<()> {
    let schema = user_service_lib::run_migrations(config).await?;
    println!("{}", schema.create_statement());
    Ok(())
}

fn schema(backend: Backend) -> AppResult<()> {
    let schema = user_service_lib::preview_schema(backend)?;
    println!("{}", schema.create_statement());
    Ok(())
}

fn print_users(users: &[User], json: bool) -> AppResult<()> {
    if json {
        let out = serde_json::to_string_pretty(users)
            .map_err(|e| AppError::internal(format!("failed to encode users: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Registered users: {}", users.len());
    for user in users {
        println!("{}", user);
    }
    Ok(())
}
