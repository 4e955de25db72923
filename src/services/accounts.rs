// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration and login against stored credentials.

use super::password::{hash_password, verify_password};
use super::{require_fields, ValidationError};
use crate::storage::{NewAccount, StoreError, StoreHandle, StoredAccount};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Registration input. `password` is plaintext and is dropped after hashing.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub department: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AccountService {
    store: StoreHandle,
}

impl AccountService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Create an account. Fails with `StoreError::DuplicateEmail` when the
    /// email is taken.
    pub async fn register(&self, registration: Registration) -> Result<StoredAccount, AccountError> {
        require_fields(&[
            ("name", registration.name.as_str()),
            ("email", registration.email.as_str()),
            ("department", registration.department.as_str()),
            ("password", registration.password.as_str()),
        ])?;

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let new_account = NewAccount {
            name: registration.name.trim().to_string(),
            department: registration.department.trim().to_string(),
            email: registration.email,
            password_hash,
        };
        let account = self
            .store
            .run(move |db| db.accounts().create(new_account))
            .await?;
        Ok(account)
    }

    /// Check an email/password pair and return the matching account.
    pub async fn login(&self, email: &str, password: &str) -> Result<StoredAccount, AccountError> {
        require_fields(&[("email", email), ("password", password)])?;

        let lookup = email.to_string();
        let account = self
            .store
            .run(move |db| db.accounts().find_by_email(&lookup))
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let password = password.to_string();
        let stored_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        if !matches {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn service() -> (AccountService, Arc<Database>, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(Database::open(&dir.path().join("accounts.redb")).unwrap());
        let store = StoreHandle::new(Arc::clone(&db), Duration::from_secs(5));
        (AccountService::new(store), db, dir)
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "A".to_string(),
            email: email.to_string(),
            department: "Eng".to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let (service, db, _dir) = service();

        let account = service.register(registration("a@x.com")).await.unwrap();

        assert_ne!(account.password_hash, "pw");
        assert!(!account.is_verified);
        let stored = db.accounts().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(stored.password_hash, account.password_hash);
    }

    #[tokio::test]
    async fn register_twice_with_same_email_fails() {
        let (service, _db, _dir) = service();
        service.register(registration("a@x.com")).await.unwrap();

        let result = service.register(registration("a@x.com")).await;
        assert!(matches!(
            result,
            Err(AccountError::Store(StoreError::DuplicateEmail))
        ));
    }

    #[tokio::test]
    async fn register_requires_every_field() {
        let (service, _db, _dir) = service();
        let mut incomplete = registration("a@x.com");
        incomplete.department = String::new();

        let result = service.register(incomplete).await;
        assert!(matches!(
            result,
            Err(AccountError::Validation(ValidationError::MissingField("department")))
        ));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let (service, _db, _dir) = service();
        service.register(registration("a@x.com")).await.unwrap();

        let wrong = service.login("a@x.com", "nope").await;
        assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));

        let account = service.login("a@x.com", "pw").await.unwrap();
        assert_eq!(account.email, "a@x.com");
    }

    #[tokio::test]
    async fn login_unknown_email_is_user_not_found() {
        let (service, _db, _dir) = service();
        let result = service.login("ghost@x.com", "pw").await;
        assert!(matches!(result, Err(AccountError::UserNotFound)));
    }
}
