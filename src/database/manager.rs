use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

const CREATE_DRINK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drink (
        id     SERIAL PRIMARY KEY,
        title  VARCHAR(80) NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

/// Title and recipe of the drink inserted by [`DatabaseManager::reset`].
const SEED_TITLE: &str = "water";
const SEED_RECIPE: &str = r#"[{"name":"water","color":"blue","parts":1}]"#;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens the connection pool and owns the `drink` table lifecycle.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect to `database.url` and make sure the `drink` table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let redacted = Self::redacted_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", redacted);

        Self::ensure_schema(&pool).await?;
        Ok(pool)
    }

    /// Idempotent table creation.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_DRINK_TABLE).execute(pool).await?;
        Ok(())
    }

    /// Drop and recreate the `drink` table, then seed a single drink.
    pub async fn reset(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("DROP TABLE IF EXISTS drink").execute(pool).await?;
        Self::ensure_schema(pool).await?;

        sqlx::query("INSERT INTO drink (title, recipe) VALUES ($1, $2)")
            .bind(SEED_TITLE)
            .bind(SEED_RECIPE)
            .execute(pool)
            .await?;

        info!("Reset drink table and seeded '{}'", SEED_TITLE);
        Ok(())
    }

    /// Connection URL with the password stripped, for logging.
    fn redacted_url(url: &str) -> Result<String, DatabaseError> {
        let mut parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if parsed.password().is_some() {
            parsed
                .set_password(Some("****"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(parsed.into())
    }
}
