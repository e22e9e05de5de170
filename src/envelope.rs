// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Request and response envelopes of the JMAP API endpoint.
//!
//! Wire shape of a request:
//! `{"using": [urn, ...], "methodCalls": [[name, arguments, "0"]]}`
//!
//! and of a response:
//! `{"sessionState": state, "methodResponses": [[name or "error", payload, "0"]]}`

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JmapError, JmapResult};

/// The only call id this client ever sends.
pub const CALL_ID: &str = "0";

/// Tag of a method response carrying an error payload.
pub const ERROR_TAG: &str = "error";

/// `[name, arguments, callId]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation(pub String, pub Value, pub String);

impl Invocation {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn payload(&self) -> &Value {
        &self.1
    }

    pub fn call_id(&self) -> &str {
        &self.2
    }

    pub fn is_error(&self) -> bool {
        self.0 == ERROR_TAG
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub using: Vec<String>,
    pub method_calls: Vec<Invocation>,
}

impl RequestEnvelope {
    /// Envelope holding exactly one call with call id [`CALL_ID`].
    pub fn single(using: Vec<String>, method_name: &str, arguments: Value) -> Self {
        Self {
            using,
            method_calls: vec![Invocation(method_name.to_string(), arguments, CALL_ID.to_string())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub session_state: String,
    pub method_responses: Vec<Invocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_ids: Option<HashMap<String, String>>,
}

impl ResponseEnvelope {
    /// Unwrap the first method response.
    ///
    /// An `"error"` tag becomes [`JmapError::Method`]; anything else hands
    /// back the payload untouched.
    pub fn into_first_payload(self) -> JmapResult<Value> {
        let invocation = self
            .method_responses
            .into_iter()
            .next()
            .ok_or(JmapError::MissingMethodResponse)?;

        if invocation.call_id() != CALL_ID {
            debug!("Response to {} carries call id {}", invocation.name(), invocation.call_id());
        }
        if invocation.is_error() {
            return Err(JmapError::Method(MethodError::new(invocation.1)));
        }
        Ok(invocation.1)
    }
}

/// Method-level error returned by the server in place of a result.
///
/// The payload is kept as sent so callers see exactly what the server said.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodError {
    payload: Value,
}

impl MethodError {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub fn error_type(&self) -> Option<&str> {
        self.payload.get("type").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.payload.get("description").and_then(Value::as_str)
    }

    pub fn kind(&self) -> MethodErrorKind {
        self.error_type()
            .map(MethodErrorKind::from)
            .unwrap_or_else(|| MethodErrorKind::Other(String::new()))
    }
}

impl fmt::Display for MethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error_type(), self.description()) {
            (Some(kind), Some(description)) => write!(f, "{}: {}", kind, description),
            (Some(kind), None) => f.write_str(kind),
            _ => write!(f, "{}", self.payload),
        }
    }
}

impl std::error::Error for MethodError {}

/// Error types from RFC 8620 section 3.6.2 and the standard /set errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodErrorKind {
    ServerUnavailable,
    ServerFail,
    ServerPartialFail,
    UnknownMethod,
    InvalidArguments,
    InvalidResultReference,
    Forbidden,
    AccountNotFound,
    AccountNotSupportedByMethod,
    AccountReadOnly,
    RequestTooLarge,
    CannotCalculateChanges,
    StateMismatch,
    AnchorNotFound,
    UnsupportedFilter,
    UnsupportedSort,
    NotFound,
    Other(String),
}

impl From<&str> for MethodErrorKind {
    fn from(value: &str) -> Self {
        match value {
            "serverUnavailable" => MethodErrorKind::ServerUnavailable,
            "serverFail" => MethodErrorKind::ServerFail,
            "serverPartialFail" => MethodErrorKind::ServerPartialFail,
            "unknownMethod" => MethodErrorKind::UnknownMethod,
            "invalidArguments" => MethodErrorKind::InvalidArguments,
            "invalidResultReference" => MethodErrorKind::InvalidResultReference,
            "forbidden" => MethodErrorKind::Forbidden,
            "accountNotFound" => MethodErrorKind::AccountNotFound,
            "accountNotSupportedByMethod" => MethodErrorKind::AccountNotSupportedByMethod,
            "accountReadOnly" => MethodErrorKind::AccountReadOnly,
            "requestTooLarge" => MethodErrorKind::RequestTooLarge,
            "cannotCalculateChanges" => MethodErrorKind::CannotCalculateChanges,
            "stateMismatch" => MethodErrorKind::StateMismatch,
            "anchorNotFound" => MethodErrorKind::AnchorNotFound,
            "unsupportedFilter" => MethodErrorKind::UnsupportedFilter,
            "unsupportedSort" => MethodErrorKind::UnsupportedSort,
            "notFound" => MethodErrorKind::NotFound,
            other => MethodErrorKind::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_wire_shape() {
        let envelope = RequestEnvelope::single(
            vec!["urn:ietf:params:jmap:core".into()],
            "Mailbox/get",
            json!({ "accountId": "a1", "ids": null }),
        );
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "using": ["urn:ietf:params:jmap:core"],
                "methodCalls": [["Mailbox/get", { "accountId": "a1", "ids": null }, "0"]]
            })
        );
    }

    #[test]
    fn unwraps_success_payload() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "sessionState": "s1",
            "methodResponses": [["Mailbox/get", { "list": [] }, "0"]]
        }))
        .unwrap();
        assert_eq!(envelope.session_state, "s1");
        assert_eq!(envelope.into_first_payload().unwrap(), json!({ "list": [] }));
    }

    #[test]
    fn unwraps_error_payload() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "sessionState": "s1",
            "methodResponses": [["error", { "type": "notFound" }, "0"]]
        }))
        .unwrap();

        let err = envelope.into_first_payload().unwrap_err();
        let method_error = err.method_error().unwrap();
        assert_eq!(method_error.payload(), &json!({ "type": "notFound" }));
        assert_eq!(method_error.kind(), MethodErrorKind::NotFound);
        assert_eq!(method_error.to_string(), "notFound");
    }

    #[test]
    fn response_keeps_invocation_parts_and_created_ids() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "sessionState": "s2",
            "methodResponses": [["Mailbox/set", { "created": { "k1": { "id": "mb9" } } }, "0"]],
            "createdIds": { "k1": "mb9" }
        }))
        .unwrap();

        let invocation = &envelope.method_responses[0];
        assert_eq!(invocation.name(), "Mailbox/set");
        assert_eq!(invocation.call_id(), CALL_ID);
        assert!(!invocation.is_error());
        assert_eq!(invocation.payload()["created"]["k1"]["id"], "mb9");
        assert_eq!(envelope.created_ids.as_ref().unwrap()["k1"], "mb9");
    }

    #[test]
    fn error_invocation_is_flagged() {
        let invocation = Invocation(ERROR_TAG.into(), json!({ "type": "serverFail" }), CALL_ID.into());
        assert!(invocation.is_error());
        assert_eq!(invocation.payload()["type"], "serverFail");
    }

    #[test]
    fn empty_response_list_is_an_error() {
        let envelope = ResponseEnvelope {
            session_state: "s1".into(),
            method_responses: vec![],
            created_ids: None,
        };
        assert!(matches!(envelope.into_first_payload(), Err(JmapError::MissingMethodResponse)));
    }

    #[test]
    fn unknown_error_types_are_preserved() {
        let err = MethodError::new(json!({ "type": "tooManyKeywords", "description": "max 100" }));
        assert_eq!(err.kind(), MethodErrorKind::Other("tooManyKeywords".into()));
        assert_eq!(err.to_string(), "tooManyKeywords: max 100");
    }
}
