use crate::api_error::ApiError;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbConnection = SqliteConnection;
pub type Pool = r2d2::Pool<ConnectionManager<DbConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY: &str = ":memory:";

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<DbConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut DbConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Builds the connection pool and brings the schema up to date.
pub fn init_pool(database_url: &str) -> Result<Pool, ApiError> {
    let manager = ConnectionManager::<DbConnection>::new(database_url);

    // Every in-memory connection is a separate database.
    let max_size = if database_url == IN_MEMORY { 1 } else { 8 };

    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;

    run_migrations(&pool)?;

    Ok(pool)
}

fn run_migrations(pool: &Pool) -> Result<(), ApiError> {
    let mut pooled = pool.get()?;
    let conn: &mut DbConnection = &mut pooled;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| ApiError::new(500, format!("Failed to run migrations: {}", e)))?;

    if !applied.is_empty() {
        info!("Applied {} migration(s)", applied.len());
    }

    Ok(())
}

#[cfg(test)]
pub fn test_pool() -> Pool {
    init_pool(IN_MEMORY).expect("an in-memory database")
}
