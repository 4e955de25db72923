// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job Board Server
//!
//! Accounts, job postings and recency-windowed job listings over a JSON
//! HTTP API. Job creation is gated on bearer tokens verified by an external
//! identity service.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer-token verification against the identity service
//! - `services` - Job queries, job creation, registration and login
//! - `storage` - Embedded store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
