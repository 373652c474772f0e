//! Single-writer actor for all database mutations.
//!
//! SQLite allows one writer at a time. Instead of letting pool connections
//! race for the write lock, every mutation is sent to one background task
//! that owns a dedicated connection and executes jobs serially, each inside
//! an immediate transaction. A job is all-or-nothing: if it returns an
//! error, the transaction rolls back and the error is handed back to the
//! caller.

use std::any::Any;

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use kabutrack_core::errors::{DatabaseError, Result};

use super::DbPool;
use crate::errors::StorageError;

// A write job: runs against the actor's connection inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

// The return type is erased so jobs with different result types can share
// one channel.
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| DatabaseError::Internal("Writer actor has stopped".to_string()))?;

        let result = ret_rx.await.map_err(|_| {
            DatabaseError::Internal("Writer actor dropped the reply channel".to_string())
        })?;

        result.map(|boxed| match boxed.downcast::<T>() {
            Ok(value) => *value,
            Err(_) => unreachable!("writer job reply type mismatch"),
        })
    }
}

/// Spawns the background task that owns one connection and processes write
/// jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            // Errors roll the transaction back; StorageError::Core carries
            // domain errors (conflicts, insufficient units) through intact.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The receiver may have given up; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
