use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;

pub mod models;
pub mod repositories;
pub mod transaction;
pub mod utils;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Connect to the database, run pending migrations, and install the
/// process-global pool used by the repository modules.
pub async fn init_database(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    println!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    println!("Migrations completed successfully");

    POOL.set(pool.clone())
        .map_err(|_| anyhow::anyhow!("Database pool initialized twice"))?;

    Ok(pool)
}

/// The global connection pool. Only valid after `init_database` has run.
pub fn pool() -> &'static PgPool {
    POOL.get()
        .expect("database pool accessed before init_database")
}
