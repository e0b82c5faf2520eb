use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::{config, db, seed, server};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env();

    // Initialize database
    let db = match db::init_db_with_pool(&config.database_url, config.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    if let Err(e) = server::serve(&config, db).await {
        tracing::error!("HTTP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
