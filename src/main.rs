use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::infrastructure::AppState;
use bookshelf::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = db::init_db(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        let state = AppState::new(db.clone(), config.max_page_limit);
        match seed::seed_demo_data(state.book_repo.as_ref()).await {
            Ok(count) => tracing::info!("Demo data seeded ({} books).", count),
            Err(e) => tracing::error!("Failed to seed data: {}", e),
        }
    }

    server::serve(db, &config).await?;
    Ok(())
}
