// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive
//! `ToSchema` for the OpenAPI document; field names are camelCase on the
//! wire.
//!
//! Request fields default to empty strings when absent so that a missing
//! field is reported as a validation error (400) rather than a
//! deserialization failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{JobPosting, StoredAccount};

// =============================================================================
// Generic Responses
// =============================================================================

/// Response carrying only a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Account Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub department: String,
    /// Plaintext password; only its hash is stored.
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub is_verified: bool,
}

impl From<StoredAccount> for AccountView {
    fn from(account: StoredAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            department: account.department,
            is_verified: account.is_verified,
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: AccountView,
}

// =============================================================================
// Job Models
// =============================================================================

/// Request to publish a job posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    /// Application URL.
    pub link: String,
}

/// Successful job creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobResponse {
    pub message: String,
    pub job: JobPosting,
}
