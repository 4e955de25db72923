// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: account_id → serialized StoredAccount
//! - `accounts_by_email`: normalized email → account_id (uniqueness index)
//! - `jobs`: job_id → serialized JobPosting
//! - `jobs_by_posted_at`: composite key (!posted_at|job_id) → job_id

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use redb::ReadableDatabase;

use super::repository::accounts::{AccountRepository, ACCOUNTS, ACCOUNTS_BY_EMAIL};
use super::repository::jobs::{JobRepository, JOBS, JOBS_BY_POSTED_AT};

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store task failed: {0}")]
    Task(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Database
// =============================================================================

/// Process-wide store handle. Opened once at startup, closed at shutdown.
pub struct Database {
    db: redb::Database,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = redb::Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(ACCOUNTS_BY_EMAIL)?;
            let _ = write_txn.open_table(JOBS)?;
            let _ = write_txn.open_table(JOBS_BY_POSTED_AT)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// Release the database file.
    pub fn close(self) {
        tracing::info!(path = %self.path.display(), "Closing store");
        drop(self.db);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cheap liveness check: opens and drops a read transaction.
    pub fn ping(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(JOBS)?;
        Ok(())
    }

    pub fn jobs(&self) -> JobRepository<'_> {
        JobRepository::new(&self.db)
    }

    pub fn accounts(&self) -> AccountRepository<'_> {
        AccountRepository::new(&self.db)
    }
}

// =============================================================================
// Async Access
// =============================================================================

/// Shared, cloneable access to the [`Database`] from async handlers.
///
/// redb calls block, so every operation runs on the blocking pool and is
/// bounded by `timeout`. A timed-out operation is abandoned, not cancelled.
#[derive(Clone)]
pub struct StoreHandle {
    db: Arc<Database>,
    timeout: Duration,
}

impl StoreHandle {
    pub fn new(db: Arc<Database>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Run a blocking store operation.
    pub async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let task = tokio::task::spawn_blocking(move || op(&db));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(StoreError::Task(join_error.to_string())),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("jobs.redb");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
        db.ping().unwrap();
        db.close();
    }

    #[test]
    fn reopen_preserves_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs.redb");

        let db = Database::open(&path).unwrap();
        let created = db
            .jobs()
            .create(crate::storage::NewJob {
                title: "Rust engineer".into(),
                description: "Build services".into(),
                link: "https://jobs.example.com/1".into(),
                posted_at: None,
            })
            .unwrap();
        db.close();

        let reopened = Database::open(&path).unwrap();
        let loaded = reopened.jobs().get(&created.id).unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[tokio::test]
    async fn handle_runs_operations_on_blocking_pool() {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(Database::open(&dir.path().join("jobs.redb")).unwrap());
        let handle = StoreHandle::new(db, Duration::from_secs(5));

        let jobs = handle.run(|db| db.jobs().list_newest_first(None)).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn handle_times_out_slow_operations() {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(Database::open(&dir.path().join("jobs.redb")).unwrap());
        let handle = StoreHandle::new(db, Duration::from_millis(20));

        let result = handle
            .run(|_| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(StoreError::Timeout(_))));
    }
}
