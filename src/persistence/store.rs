use crate::error::{Result, TaskError};
use crate::persistence::database::{load_database, save_database, Database};
use std::path::PathBuf;

/// The record store: an in-memory snapshot backed by one JSON file.
///
/// All mutations go through [`Store::transact`], which runs the closure
/// against a clone of the snapshot and persists it atomically before
/// committing in memory. If the closure or the write fails, neither the
/// in-memory state nor the file changes, so multi-record writes are all
/// or nothing. Mutation requires `&mut Store`, so writes are serialized
/// by construction.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    db: Database,
}

impl Store {
    /// Open a store at the given snapshot path, starting empty if absent
    pub fn open(path: PathBuf) -> Result<Self> {
        let db = load_database(&path)?;
        Ok(Self { path, db })
    }

    /// Run a read-only closure over the current snapshot
    pub fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> T {
        f(&self.db)
    }

    /// Run a mutating closure transactionally: both the closure and the
    /// disk write must succeed before anything is committed.
    pub fn transact<T>(&mut self, f: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut working = self.db.clone();
        let out = f(&mut working)?;
        save_database(&self.path, &working).map_err(TaskError::Storage)?;
        self.db = working;
        Ok(out)
    }
}
