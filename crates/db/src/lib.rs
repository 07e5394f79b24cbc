use std::{env, str::FromStr};

use sqlx::{
    Error, SqlitePool,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod models;
pub mod serde_helpers;

/// Schema migrations embedded at build time. Exposed so tests can apply
/// the schema to in-memory pools.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    /// Create a new DBService connecting to SQLite.
    /// Uses DATABASE_URL environment variable.
    pub async fn new() -> Result<DBService, Error> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://tasks.db".to_string());
        Self::from_url(&database_url).await
    }

    /// Connect to the given database URL and run migrations.
    pub async fn from_url(database_url: &str) -> Result<DBService, Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        MIGRATOR.run(&pool).await?;
        tracing::debug!("database ready at {}", database_url);
        Ok(DBService { pool })
    }
}
