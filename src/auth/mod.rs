// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authorization for the job board's protected operations.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. Server:
//!    - Rejects a missing or non-`Bearer ` header immediately (no outbound call)
//!    - Calls the identity service with the token and the service API key
//!    - Attaches the returned identity to the request
//! 3. Handlers read the identity through the `Auth` extractor
//!
//! ## Security
//!
//! - Only job creation requires authentication; reads are public
//! - Tokens are re-verified on every request; nothing is cached
//! - All rejections are 401; the reason only appears in logs

pub mod client;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod middleware;

pub use client::{IdentityClient, IdentityClientError};
pub use error::AuthError;
pub use extractor::Auth;
pub use identity::VerifiedIdentity;
pub use middleware::{authorize, require_identity};
