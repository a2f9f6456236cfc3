//! SQLite-backed Entity Store.
//!
//! [`Database`] owns a single shared connection. Each core operation borrows
//! it through [`Database::read`] or [`Database::transaction`] and works
//! against the [`EntityStore`] contract, never against raw SQL.

mod schema;
mod store;

pub use store::{EntityStore, SqliteStore};

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::{Connection, TransactionBehavior};

use crate::error::HrResult;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "hr-admin")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("hr-admin.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Runs read-only work against the store outside any explicit transaction.
    pub fn read<T>(&self, f: impl FnOnce(&SqliteStore<'_>) -> HrResult<T>) -> HrResult<T> {
        let conn = self.conn.lock().expect("database lock poisoned");
        f(&SqliteStore::new(&conn))
    }

    /// Runs `f` inside one `IMMEDIATE` transaction.
    ///
    /// The write lock is taken before the first read, so every
    /// check-then-act sequence in `f` is serialized against other writers.
    /// The transaction commits only when `f` returns `Ok`; any error rolls
    /// everything back.
    pub fn transaction<T>(&self, f: impl FnOnce(&SqliteStore<'_>) -> HrResult<T>) -> HrResult<T> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&SqliteStore::new(&tx))?;
        tx.commit()?;
        Ok(value)
    }
}
