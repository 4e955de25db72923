// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::auth::IdentityClient;
use crate::config::JobsConfig;
use crate::services::{AccountService, JobService};
use crate::storage::StoreHandle;

/// Shared handler state. Every field is a cheap clone of a process-wide
/// handle; there is no other mutable shared state.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub identity: IdentityClient,
    pub jobs: JobService,
    pub accounts: AccountService,
    pub jobs_config: JobsConfig,
}

impl AppState {
    pub fn new(store: StoreHandle, identity: IdentityClient, jobs_config: JobsConfig) -> Self {
        Self {
            jobs: JobService::new(store.clone()),
            accounts: AccountService::new(store.clone()),
            store,
            identity,
            jobs_config,
        }
    }
}
