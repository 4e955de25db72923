// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job listing and creation.
//!
//! Listings are always newest first. A windowed listing keeps postings with
//! `posted_at >= now - window`, where `now` is taken when the query runs, so
//! two queries a moment apart can disagree on postings at the boundary.

use chrono::{DateTime, TimeDelta, Utc};

use super::{require_fields, ValidationError};
use crate::config::AllJobsPolicy;
use crate::storage::{JobPosting, NewJob, StoreError, StoreHandle};

/// Time window applied to a job listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobWindow {
    /// No filter.
    All,
    /// Postings no older than the given duration.
    Since(TimeDelta),
}

impl JobWindow {
    /// Inclusive lower bound on `posted_at`, or `None` when unbounded.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            JobWindow::All => None,
            JobWindow::Since(window) => now.checked_sub_signed(window),
        }
    }
}

impl From<AllJobsPolicy> for JobWindow {
    fn from(policy: AllJobsPolicy) -> Self {
        match policy {
            AllJobsPolicy::Unfiltered => JobWindow::All,
            AllJobsPolicy::MaxAge(age) => JobWindow::Since(age),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fields accepted when creating a posting.
#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Job queries and creation over the shared store.
#[derive(Clone)]
pub struct JobService {
    store: StoreHandle,
}

impl JobService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// List postings inside `window`, newest first.
    pub async fn list_jobs(&self, window: JobWindow) -> Result<Vec<JobPosting>, StoreError> {
        let cutoff = window.cutoff(Utc::now());
        self.store
            .run(move |db| db.jobs().list_newest_first(cutoff))
            .await
    }

    /// Validate and persist a new posting. `posted_at` is the creation time.
    ///
    /// Callers are expected to have authorized the request already.
    pub async fn create_job(&self, draft: JobDraft) -> Result<JobPosting, JobError> {
        require_fields(&[
            ("title", draft.title.as_str()),
            ("description", draft.description.as_str()),
            ("link", draft.link.as_str()),
        ])?;

        let new_job = NewJob {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            link: draft.link.trim().to_string(),
            posted_at: None,
        };
        let posting = self.store.run(move |db| db.jobs().create(new_job)).await?;
        Ok(posting)
    }
}
