// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job posting repository.
//!
//! Postings are create-then-read-only: there is no update or delete path.
//! Every posting is written together with an entry in `jobs_by_posted_at`,
//! whose keys sort newest first, so listings never need an in-memory sort.

use chrono::{DateTime, SubsecRound, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage::StoreResult;

/// Primary table: job_id → serialized JobPosting (JSON bytes).
pub(crate) const JOBS: TableDefinition<&str, &[u8]> = TableDefinition::new("jobs");

/// Index: `!posted_at_micros_be | job_id` → job_id, ascending key = newest first.
pub(crate) const JOBS_BY_POSTED_AT: TableDefinition<&[u8], &str> =
    TableDefinition::new("jobs_by_posted_at");

/// A stored job posting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// Store-assigned identifier (UUID).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Where to apply.
    pub link: String,
    /// When the posting was created (microsecond precision).
    pub posted_at: DateTime<Utc>,
}

/// Fields for a posting that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Defaults to the creation time when `None`.
    pub posted_at: Option<DateTime<Utc>>,
}

/// Build a composite key for the jobs_by_posted_at table.
///
/// The timestamp is mapped to an order-preserving u64 and bit-inverted so a
/// forward scan yields the newest posting first. The id suffix keeps keys
/// unique and breaks ties deterministically.
fn posted_at_key(posted_at: DateTime<Utc>, job_id: &str) -> Vec<u8> {
    let ordered = (posted_at.timestamp_micros() as u64) ^ (1 << 63);
    let mut key = Vec::with_capacity(8 + job_id.len());
    key.extend_from_slice(&(!ordered).to_be_bytes());
    key.extend_from_slice(job_id.as_bytes());
    key
}

/// Repository for job postings.
pub struct JobRepository<'a> {
    db: &'a redb::Database,
}

impl<'a> JobRepository<'a> {
    pub fn new(db: &'a redb::Database) -> Self {
        Self { db }
    }

    /// Persist a new posting and return it with its assigned id.
    pub fn create(&self, job: NewJob) -> StoreResult<JobPosting> {
        let posting = JobPosting {
            id: Uuid::new_v4().to_string(),
            title: job.title,
            description: job.description,
            link: job.link,
            posted_at: job.posted_at.unwrap_or_else(Utc::now).trunc_subsecs(6),
        };
        let json = serde_json::to_vec(&posting)?;
        let key = posted_at_key(posting.posted_at, &posting.id);

        let write_txn = self.db.begin_write()?;
        {
            let mut jobs = write_txn.open_table(JOBS)?;
            jobs.insert(posting.id.as_str(), json.as_slice())?;

            let mut index = write_txn.open_table(JOBS_BY_POSTED_AT)?;
            index.insert(key.as_slice(), posting.id.as_str())?;
        }
        write_txn.commit()?;

        Ok(posting)
    }

    /// Look up a single posting.
    pub fn get(&self, job_id: &str) -> StoreResult<Option<JobPosting>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(JOBS)?;
        match table.get(job_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// List postings newest first.
    ///
    /// With a `cutoff`, only postings with `posted_at >= cutoff` are returned
    /// (inclusive lower bound).
    pub fn list_newest_first(&self, cutoff: Option<DateTime<Utc>>) -> StoreResult<Vec<JobPosting>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(JOBS_BY_POSTED_AT)?;
        let jobs = read_txn.open_table(JOBS)?;

        let mut results = Vec::new();
        for entry in index.iter()? {
            let (_, job_id) = entry?;
            let Some(value) = jobs.get(job_id.value())? else {
                tracing::warn!(job_id = job_id.value(), "Index entry without job record");
                continue;
            };
            let posting: JobPosting = serde_json::from_slice(value.value())?;

            // Index is sorted newest first; everything after this is older.
            if cutoff.is_some_and(|cutoff| posting.posted_at < cutoff) {
                break;
            }
            results.push(posting);
        }

        Ok(results)
    }

    /// Number of stored postings.
    pub fn count(&self) -> StoreResult<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(JOBS)?;
        let mut count = 0;
        for entry in table.iter()? {
            entry?;
            count += 1;
        }
        Ok(count)
    }
}
