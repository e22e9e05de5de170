// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::methods::common::{QueryArguments, SetArguments};

/// Mailbox object (RFC 8621 section 2). Every property is optional because
/// `properties` on /get can trim the response, and /set creations only send
/// what is being set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_emails: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_emails: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_threads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_threads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_rights: Option<MailboxRights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subscribed: Option<bool>,
}

impl Mailbox {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxRights {
    pub may_read_items: bool,
    pub may_add_items: bool,
    pub may_remove_items: bool,
    pub may_set_seen: bool,
    pub may_set_keywords: bool,
    pub may_create_child: bool,
    pub may_rename: bool,
    pub may_delete: bool,
    pub may_submit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxSetArguments {
    #[serde(flatten)]
    pub set: SetArguments<Mailbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_destroy_remove_emails: Option<bool>,
}

account_scoped!(MailboxSetArguments, via set);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxFilterCondition {
    /// `Some(None)` filters for top-level mailboxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_any_role: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subscribed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxQueryArguments {
    #[serde(flatten)]
    pub query: QueryArguments<MailboxFilterCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_as_tree: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_as_tree: Option<bool>,
}

account_scoped!(MailboxQueryArguments, via query);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::common::Filter;
    use serde_json::json;

    #[test]
    fn creation_sends_only_set_properties() {
        let args = MailboxSetArguments {
            set: SetArguments::default().with_create("k1", Mailbox::named("Archive 2024")),
            on_destroy_remove_emails: None,
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({ "accountId": null, "create": { "k1": { "name": "Archive 2024" } } })
        );
    }

    #[test]
    fn parses_server_mailbox() {
        let mailbox: Mailbox = serde_json::from_value(json!({
            "id": "mb1",
            "name": "Inbox",
            "parentId": null,
            "role": "inbox",
            "sortOrder": 10,
            "totalEmails": 16307,
            "unreadEmails": 13905,
            "totalThreads": 5833,
            "unreadThreads": 5128,
            "myRights": {
                "mayAddItems": true, "mayRename": false, "maySubmit": true, "mayDelete": false,
                "maySetKeywords": true, "mayRemoveItems": true, "mayCreateChild": true,
                "maySetSeen": true, "mayReadItems": true
            },
            "isSubscribed": true
        }))
        .unwrap();
        assert_eq!(mailbox.role.as_deref(), Some("inbox"));
        assert_eq!(mailbox.parent_id, None);
        assert!(mailbox.my_rights.unwrap().may_submit);
    }

    #[test]
    fn top_level_filter_sends_explicit_null() {
        let args = MailboxQueryArguments {
            query: QueryArguments {
                account_id: Some("a1".into()),
                filter: Some(Filter::Condition(MailboxFilterCondition {
                    parent_id: Some(None),
                    ..Default::default()
                })),
                ..Default::default()
            },
            sort_as_tree: Some(true),
            filter_as_tree: None,
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({ "accountId": "a1", "filter": { "parentId": null }, "sortAsTree": true })
        );
    }
}
