// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::CORE;
use crate::error::{JmapError, JmapResult};
use indexmap::IndexMap;

/// The session resource served at the discovery URL.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub api_url: String,
    pub accounts: IndexMap<String, Account>,
    #[serde(default)]
    pub capabilities: IndexMap<String, Value>,
    #[serde(default)]
    pub primary_accounts: HashMap<String, String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub event_source_url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_personal: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub account_capabilities: IndexMap<String, Value>,
}

/// Limits advertised under `urn:ietf:params:jmap:core`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreCapability {
    pub max_size_upload: u64,
    pub max_concurrent_upload: u64,
    pub max_size_request: u64,
    pub max_concurrent_requests: u64,
    pub max_calls_in_request: u64,
    pub max_objects_in_get: u64,
    pub max_objects_in_set: u64,
    #[serde(default)]
    pub collation_algorithms: Vec<String>,
}

impl Session {
    pub fn account_ids(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    /// First account in the order the server listed them.
    ///
    /// Servers are free to order `accounts` however they like, so this is a
    /// convenience, not a stable choice across servers.
    pub fn first_account_id(&self) -> Option<&str> {
        self.accounts.keys().next().map(String::as_str)
    }

    /// Primary account the server designates for a capability, if any.
    pub fn primary_account_id(&self, capability: &str) -> Option<&str> {
        self.primary_accounts.get(capability).map(String::as_str)
    }

    pub fn has_capability(&self, urn: &str) -> bool {
        self.capabilities.contains_key(urn)
    }

    pub fn core_capability(&self) -> JmapResult<Option<CoreCapability>> {
        self.capabilities
            .get(CORE)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| JmapError::decode("core capability", e))
            })
            .transpose()
    }
}

/// Session ownership of a client: nothing fetched yet, or a fetched snapshot.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Ready(Arc<Session>),
}

impl SessionState {
    pub fn session(&self) -> JmapResult<Arc<Session>> {
        match self {
            SessionState::Ready(session) => Ok(Arc::clone(session)),
            SessionState::Uninitialized => Err(JmapError::SessionNotInitialized),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }
}
