// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use jmap_client::{Client, Transport, TransportError};
use serde_json::{json, Value};
use tokio::sync::Mutex;

pub const SESSION_URL: &str = "http://jmap.test/.well-known/jmap";
pub const API_URL: &str = "http://jmap.test/api";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get { url: String, headers: HashMap<String, String> },
    Post { url: String, body: Value, headers: HashMap<String, String> },
}

/// Transport stub that replays canned responses and records every call.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    get_responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    post_responses: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_get(&self, response: Result<Value, TransportError>) {
        self.get_responses.lock().await.push_back(response);
    }

    pub async fn push_post(&self, response: Result<Value, TransportError>) {
        self.post_responses.lock().await.push_back(response);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn posts(&self) -> Vec<(String, Value)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                Call::Post { url, body, .. } => Some((url.clone(), body.clone())),
                Call::Get { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<Value, TransportError> {
        self.calls.lock().await.push(Call::Get {
            url: url.to_string(),
            headers: headers.clone(),
        });
        self.get_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no canned GET response".to_string())))
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, TransportError> {
        self.calls.lock().await.push(Call::Post {
            url: url.to_string(),
            body: body.clone(),
            headers: headers.clone(),
        });
        self.post_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no canned POST response".to_string())))
    }
}

pub fn session_with_accounts(accounts: &[&str]) -> Value {
    let accounts: serde_json::Map<String, Value> = accounts
        .iter()
        .map(|id| (id.to_string(), json!({ "name": format!("{}@example.com", id) })))
        .collect();
    json!({
        "apiUrl": API_URL,
        "accounts": accounts,
        "capabilities": {
            "urn:ietf:params:jmap:core": {},
            "urn:ietf:params:jmap:mail": {},
            "urn:ietf:params:jmap:submission": {}
        },
        "state": "s0"
    })
}

pub fn method_response(tag: &str, payload: Value) -> Value {
    json!({ "sessionState": "s0", "methodResponses": [[tag, payload, "0"]] })
}

pub fn client(transport: &Arc<RecordingTransport>) -> Client {
    let transport: Arc<dyn Transport> = transport.clone();
    Client::builder(SESSION_URL, "token-123", transport)
        .build()
        .expect("client builds")
}

/// Client that has already fetched `session`.
pub async fn ready_client(transport: &Arc<RecordingTransport>, session: Value) -> Client {
    transport.push_get(Ok(session)).await;
    let client = client(transport);
    client.fetch_session().await.expect("session fetch");
    client
}
