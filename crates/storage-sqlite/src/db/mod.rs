//! Database connection management.
//!
//! Reads go through an r2d2 pool; writes go through the single writer actor
//! in [`write_actor`], which executes each job inside an immediate
//! transaction.

mod write_actor;

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use kabutrack_core::errors::{DatabaseError, Result};

use crate::errors::StorageError;

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Enables foreign keys and a busy timeout on every pooled connection.
#[derive(Debug)]
struct ConnectionOptions;

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ConnectionOptions
{
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates a connection pool for the given database path.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(10)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

/// Gets a pooled connection for read queries.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()).into())
}

/// Applies pending migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))
        .map_err(kabutrack_core::Error::from)?;
    Ok(())
}

/// Creates the pool, runs migrations, and spawns the writer actor.
///
/// Must be called from within a tokio runtime; the writer actor is a
/// spawned task.
pub fn init(db_path: &str) -> Result<(Arc<DbPool>, WriteHandle)> {
    let pool = create_pool(db_path)?;
    let mut conn = get_connection(&pool)?;
    run_migrations(&mut conn)?;
    drop(conn);

    let writer = spawn_writer(pool.as_ref().clone());
    Ok((pool, writer))
}
