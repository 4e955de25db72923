// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account repository.
//!
//! Email uniqueness is enforced here, inside the write transaction that
//! inserts the account, so concurrent registrations cannot both succeed.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{StoreError, StoreResult};

/// Primary table: account_id → serialized StoredAccount (JSON bytes).
pub(crate) const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Unique index: normalized email → account_id.
pub(crate) const ACCOUNTS_BY_EMAIL: TableDefinition<&str, &str> =
    TableDefinition::new("accounts_by_email");

/// Account record. `password_hash` never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredAccount {
    pub id: String,
    pub name: String,
    pub department: String,
    /// Normalized (trimmed, lowercase) email.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Reserved for an email confirmation flow; always false today.
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub department: String,
    pub email: String,
    pub password_hash: String,
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AccountRepository<'a> {
    db: &'a redb::Database,
}

impl<'a> AccountRepository<'a> {
    pub fn new(db: &'a redb::Database) -> Self {
        Self { db }
    }

    /// Insert a new account.
    ///
    /// # Errors
    /// `StoreError::DuplicateEmail` if the email is already registered.
    pub fn create(&self, account: NewAccount) -> StoreResult<StoredAccount> {
        let stored = StoredAccount {
            id: Uuid::new_v4().to_string(),
            name: account.name,
            department: account.department,
            email: normalize_email(&account.email),
            password_hash: account.password_hash,
            is_verified: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec(&stored)?;

        let write_txn = self.db.begin_write()?;
        let taken = {
            let by_email = write_txn.open_table(ACCOUNTS_BY_EMAIL)?;
            let existing = by_email.get(stored.email.as_str())?.is_some();
            existing
        };
        if taken {
            write_txn.abort()?;
            return Err(StoreError::DuplicateEmail);
        }
        {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            accounts.insert(stored.id.as_str(), json.as_slice())?;

            let mut by_email = write_txn.open_table(ACCOUNTS_BY_EMAIL)?;
            by_email.insert(stored.email.as_str(), stored.id.as_str())?;
        }
        write_txn.commit()?;

        Ok(stored)
    }

    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<StoredAccount>> {
        let email = normalize_email(email);
        let read_txn = self.db.begin_read()?;
        let by_email = read_txn.open_table(ACCOUNTS_BY_EMAIL)?;
        let accounts = read_txn.open_table(ACCOUNTS)?;

        let Some(account_id) = by_email.get(email.as_str())? else {
            return Ok(None);
        };
        match accounts.get(account_id.value())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}
