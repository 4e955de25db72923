// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for accounts and job postings in an embedded redb
//! database. The service holds no authoritative copy of either collection:
//! every read goes back to the store.
//!
//! ## Lifecycle
//!
//! - [`Database::open`] runs once at startup and creates missing tables
//! - [`StoreHandle`] is the shared handle passed to services; it moves every
//!   call onto the blocking pool under a timeout
//! - [`Database::close`] runs at shutdown
//!
//! ## Collections
//!
//! ```text
//! accounts            account_id -> StoredAccount (JSON)
//! accounts_by_email   email      -> account_id
//! jobs                job_id     -> JobPosting (JSON)
//! jobs_by_posted_at   !ts|job_id -> job_id
//! ```

pub mod database;
pub mod repository;

pub use database::{Database, StoreError, StoreHandle, StoreResult};
pub use repository::{
    normalize_email, AccountRepository, JobPosting, JobRepository, NewAccount, NewJob,
    StoredAccount,
};
