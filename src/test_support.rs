// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{sync::Arc, time::Duration};

use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

use crate::auth::IdentityClient;
use crate::config::{IdentityConfig, JobsConfig};
use crate::state::AppState;
use crate::storage::{Database, StoreHandle};

/// State backed by a temp-dir store and an identity client pointed at `server`.
pub(crate) fn test_state(server: &MockServer) -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("test.redb")).unwrap();
    let store = StoreHandle::new(Arc::new(db), Duration::from_secs(5));
    let identity = IdentityClient::new(&IdentityConfig {
        verify_url: Url::parse(&format!("{}/verify", server.uri())).unwrap(),
        api_key: "test-key".to_string(),
        api_key_header: "x-api-key".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    (AppState::new(store, identity, JobsConfig::default()), dir)
}
