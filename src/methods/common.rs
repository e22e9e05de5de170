// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Argument and response shapes shared by the standard /get, /changes,
//! /set and /query methods (RFC 8620 section 5).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::methods::AccountScoped;

/// Arguments of a standard `Foo/get` call.
///
/// `account_id: None` is completed by the client before dispatch.
/// `ids: None` asks for every object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetArguments {
    pub account_id: Option<String>,
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
}

impl GetArguments {
    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            ..Self::default()
        }
    }

    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(properties.into_iter().map(Into::into).collect());
        self
    }
}

account_scoped!(GetArguments);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse<T> {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub list: Vec<T>,
    #[serde(default)]
    pub not_found: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesArguments {
    pub account_id: Option<String>,
    pub since_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_changes: Option<u64>,
}

impl ChangesArguments {
    pub fn since(state: impl Into<String>) -> Self {
        Self {
            since_state: state.into(),
            ..Self::default()
        }
    }
}

account_scoped!(ChangesArguments);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub old_state: String,
    #[serde(default)]
    pub new_state: String,
    #[serde(default)]
    pub has_more_changes: bool,
    #[serde(default)]
    pub created: Vec<String>,
    #[serde(default)]
    pub updated: Vec<String>,
    #[serde(default)]
    pub destroyed: Vec<String>,
    /// Only sent by `Mailbox/changes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_properties: Option<Vec<String>>,
}

/// JSON pointer paths to new values, as used by `update` in /set calls.
pub type PatchObject = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetArguments<T> {
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_in_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<HashMap<String, T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<HashMap<String, PatchObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroy: Option<Vec<String>>,
}

impl<T> Default for SetArguments<T> {
    fn default() -> Self {
        Self {
            account_id: None,
            if_in_state: None,
            create: None,
            update: None,
            destroy: None,
        }
    }
}

impl<T> SetArguments<T> {
    pub fn with_create(mut self, creation_id: impl Into<String>, object: T) -> Self {
        self.create.get_or_insert_with(HashMap::new).insert(creation_id.into(), object);
        self
    }

    pub fn with_update(mut self, id: impl Into<String>, patch: PatchObject) -> Self {
        self.update.get_or_insert_with(HashMap::new).insert(id.into(), patch);
        self
    }

    pub fn with_destroy(mut self, id: impl Into<String>) -> Self {
        self.destroy.get_or_insert_with(Vec::new).push(id.into());
        self
    }
}

impl<T> AccountScoped for SetArguments<T> {
    fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    fn set_account_id(&mut self, account_id: String) {
        self.account_id = Some(account_id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetResponse<T> {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub old_state: Option<String>,
    #[serde(default)]
    pub new_state: String,
    #[serde(default)]
    pub created: Option<HashMap<String, T>>,
    #[serde(default)]
    pub updated: Option<HashMap<String, Option<T>>>,
    #[serde(default)]
    pub destroyed: Option<Vec<String>>,
    #[serde(default)]
    pub not_created: Option<HashMap<String, SetError>>,
    #[serde(default)]
    pub not_updated: Option<HashMap<String, SetError>>,
    #[serde(default)]
    pub not_destroyed: Option<HashMap<String, SetError>>,
}

/// Per-object failure inside a successful /set response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperatorKind {
    And,
    Or,
    Not,
}

/// A filter tree whose leaves are method-specific conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter<C> {
    Operator {
        operator: FilterOperatorKind,
        conditions: Vec<Filter<C>>,
    },
    Condition(C),
}

impl<C> Filter<C> {
    pub fn and(conditions: Vec<Filter<C>>) -> Self {
        Filter::Operator { operator: FilterOperatorKind::And, conditions }
    }

    pub fn or(conditions: Vec<Filter<C>>) -> Self {
        Filter::Operator { operator: FilterOperatorKind::Or, conditions }
    }

    pub fn not(conditions: Vec<Filter<C>>) -> Self {
        Filter::Operator { operator: FilterOperatorKind::Not, conditions }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparator {
    pub property: String,
    #[serde(default = "default_ascending")]
    pub is_ascending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
}

fn default_ascending() -> bool {
    true
}

impl Comparator {
    pub fn ascending(property: impl Into<String>) -> Self {
        Self { property: property.into(), is_ascending: true, collation: None }
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self { property: property.into(), is_ascending: false, collation: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryArguments<C> {
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter<C>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Comparator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculate_total: Option<bool>,
}

impl<C> Default for QueryArguments<C> {
    fn default() -> Self {
        Self {
            account_id: None,
            filter: None,
            sort: None,
            position: None,
            anchor: None,
            anchor_offset: None,
            limit: None,
            calculate_total: None,
        }
    }
}

impl<C> AccountScoped for QueryArguments<C> {
    fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    fn set_account_id(&mut self, account_id: String) {
        self.account_id = Some(account_id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub query_state: String,
    #[serde(default)]
    pub can_calculate_changes: bool,
    #[serde(default)]
    pub position: u64,
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_arguments_send_null_ids() {
        let args = GetArguments::for_account("a1");
        assert_eq!(serde_json::to_value(&args).unwrap(), json!({ "accountId": "a1", "ids": null }));
    }

    #[test]
    fn set_arguments_omit_unused_operations() {
        let args: SetArguments<Value> = SetArguments::default().with_destroy("m1").with_destroy("m2");
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({ "accountId": null, "destroy": ["m1", "m2"] })
        );
    }

    #[test]
    fn filter_operator_serializes_uppercase() {
        let filter: Filter<Value> = Filter::and(vec![
            Filter::Condition(json!({ "inMailbox": "inbox" })),
            Filter::not(vec![Filter::Condition(json!({ "hasKeyword": "$seen" }))]),
        ]);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "operator": "AND",
                "conditions": [
                    { "inMailbox": "inbox" },
                    { "operator": "NOT", "conditions": [{ "hasKeyword": "$seen" }] }
                ]
            })
        );
    }

    #[test]
    fn set_response_reports_partial_failures() {
        let response: SetResponse<Value> = serde_json::from_value(json!({
            "accountId": "a1",
            "oldState": "1",
            "newState": "2",
            "created": { "k1": { "id": "m7" } },
            "notDestroyed": { "m3": { "type": "notFound" } }
        }))
        .unwrap();
        assert_eq!(response.created.unwrap()["k1"], json!({ "id": "m7" }));
        assert_eq!(response.not_destroyed.unwrap()["m3"].error_type, "notFound");
        assert!(response.updated.is_none());
    }

    #[test]
    fn get_response_tolerates_sparse_payloads() {
        let response: GetResponse<Value> = serde_json::from_value(json!({ "list": [] })).unwrap();
        assert!(response.list.is_empty());
        assert!(response.not_found.is_empty());
    }
}
