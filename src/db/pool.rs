//! Single SQLite connection per CLI invocation.
//!
//! Several `tplanner` processes may hit the same file; writers wait up to
//! `BUSY_TIMEOUT` for each other instead of failing with SQLITE_BUSY.

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// `BEGIN IMMEDIATE`: the write lock is taken up front, so reads made
    /// inside the transaction cannot be invalidated by another writer.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        self.conn.transaction_with_behavior(TransactionBehavior::Immediate)
    }

    pub fn with_conn<F, T>(&mut self, func: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        func(&mut self.conn)
    }
}
