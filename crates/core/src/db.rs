use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use crate::errors::DatabaseError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection options applied on checkout.
///
/// Foreign keys are off by default in SQLite; the ledger relies on them.
/// The busy timeout bounds writer contention instead of failing immediately.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the database file if needed and runs pending migrations.
pub fn init(db_path: &str) -> Result<(), DatabaseError> {
    if !Path::new(db_path).exists() {
        create_db_file(db_path)?;
    }

    let pool = create_pool(db_path)?;
    run_migrations(&pool)?;
    info!("database ready at {}", db_path);
    Ok(())
}

/// Builds the shared connection pool. Checkout is bounded so a saturated
/// pool surfaces as an error instead of hanging the request.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>, DatabaseError> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;
    Ok(Arc::new(pool))
}

/// Checks a connection out of the pool.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

pub fn run_migrations(pool: &Arc<DbPool>) -> Result<(), DatabaseError> {
    let mut conn = pool
        .get()
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    Ok(())
}

fn create_db_file(db_path: &str) -> Result<(), DatabaseError> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.exists() {
            fs::create_dir_all(db_dir)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        }
    }
    fs::File::create(db_path).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    Ok(())
}
