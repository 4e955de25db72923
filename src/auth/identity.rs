// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified identity attached to an authorized request.

use serde::Serialize;

/// Identity returned by the identity service for a bearer token.
///
/// The body is taken as-is; its shape belongs to the identity service.
/// Lives in the request extensions for one request and is never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VerifiedIdentity(serde_json::Value);

/// Fields tried, in order, when looking for a subject identifier.
const SUBJECT_FIELDS: [&str; 4] = ["id", "sub", "user_id", "uid"];

impl VerifiedIdentity {
    pub fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    /// Raw identity document.
    pub fn body(&self) -> &serde_json::Value {
        &self.0
    }

    /// Best-effort subject identifier for logging.
    pub fn subject(&self) -> Option<String> {
        SUBJECT_FIELDS.iter().find_map(|field| match self.0.get(field)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subject_prefers_id_then_sub() {
        let identity = VerifiedIdentity::new(json!({"sub": "user_2", "id": "user_1"}));
        assert_eq!(identity.subject(), Some("user_1".to_string()));

        let identity = VerifiedIdentity::new(json!({"sub": "user_2"}));
        assert_eq!(identity.subject(), Some("user_2".to_string()));
    }

    #[test]
    fn numeric_subject_is_stringified() {
        let identity = VerifiedIdentity::new(json!({"user_id": 42}));
        assert_eq!(identity.subject(), Some("42".to_string()));
    }

    #[test]
    fn unrecognized_body_has_no_subject() {
        let identity = VerifiedIdentity::new(json!(["not", "an", "object"]));
        assert_eq!(identity.subject(), None);
        assert!(identity.body().is_array());
    }
}
