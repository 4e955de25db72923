// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the store.
//!
//! Each repository borrows the open redb database and owns the table
//! definitions for its collection.

pub mod accounts;
pub mod jobs;

pub use accounts::{normalize_email, AccountRepository, NewAccount, StoredAccount};
pub use jobs::{JobPosting, JobRepository, NewJob};
