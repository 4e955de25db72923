// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Domain operations sitting between HTTP handlers and the store.
//!
//! - `jobs` - windowed job listing and job creation
//! - `accounts` - registration and login
//! - `password` - Argon2id hashing

pub mod accounts;
pub mod jobs;
pub mod password;

pub use accounts::{AccountError, AccountService, Registration};
pub use jobs::{JobDraft, JobError, JobService, JobWindow};

/// Client-supplied data failed a precondition. Checked before any store call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Reject empty or whitespace-only required fields, in the given order.
pub(crate) fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ValidationError::MissingField(*name)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_missing_field_is_reported() {
        let result = require_fields(&[("title", "x"), ("description", " "), ("link", "")]);
        assert_eq!(result, Err(ValidationError::MissingField("description")));
        assert_eq!(
            ValidationError::MissingField("description").to_string(),
            "description is required"
        );
    }

    #[test]
    fn all_present_passes() {
        assert!(require_fields(&[("title", "x"), ("link", "y")]).is_ok());
    }
}
