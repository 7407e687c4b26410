//! PostgreSQL pool management and migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::error::Result;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Connect using `DATABASE_URL` with the default pool size.
    pub async fn new() -> Result<Self> {
        Self::from_config(&DatabaseConfig::default()).await
    }

    /// Connect using explicit configuration.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool)
            .connect(&config.database_url())
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations (creates the `favorite_movies` table).
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| crate::error::CinelistError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<bool> {
        let row = sqlx::query("SELECT 1 as health").fetch_one(&self.pool).await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
