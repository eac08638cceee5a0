use anyhow::Result;
use shopfront::config::AppConfig;
use shopfront::server::ServerBuilder;
use shopfront::storage::Stores;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shopfront=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("SHOPFRONT_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::from_yaml_file(&path)?
        }
        Err(_) => AppConfig::default(),
    }
    .apply_env()?;

    if config.auth.enabled && config.auth.jwt_secret == "change-me" {
        tracing::warn!("Using the default JWT secret; set SHOPFRONT_JWT_SECRET");
    }

    let stores = open_stores(&config).await?;

    ServerBuilder::new(config).with_stores(stores).serve().await
}

#[cfg(feature = "postgres")]
async fn open_stores(config: &AppConfig) -> Result<Stores> {
    use sqlx::postgres::PgPoolOptions;

    let Some(database) = &config.database else {
        tracing::info!("No database configured, using in-memory stores");
        return Ok(Stores::in_memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    shopfront::storage::ensure_schema(&pool).await?;

    tracing::info!("Connected to PostgreSQL");
    Ok(Stores::postgres(pool))
}

#[cfg(not(feature = "postgres"))]
async fn open_stores(config: &AppConfig) -> Result<Stores> {
    if config.database.is_some() {
        tracing::warn!("Database configured but the postgres feature is off; using in-memory stores");
    }
    Ok(Stores::in_memory())
}
