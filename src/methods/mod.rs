// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Static method table: every supported JMAP method is a marker type whose
//! [`Method`] impl names the wire method and its argument/response shapes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::JmapResult;

pub mod common;
pub mod email;
pub mod email_submission;
pub mod identity;
pub mod mailbox;

pub use self::common::*;
pub use self::email::*;
pub use self::email_submission::*;
pub use self::identity::*;
pub use self::mailbox::*;

pub trait Method {
    /// Method name as sent on the wire, e.g. `Mailbox/get`.
    const NAME: &'static str;
    type Arguments: Serialize + AccountScoped + Send;
    type Response: DeserializeOwned;
}

/// Argument objects carrying an `accountId`.
pub trait AccountScoped {
    fn account_id(&self) -> Option<&str>;
    fn set_account_id(&mut self, account_id: String);
}

/// Fill a missing `accountId` from `default`; leave a set one alone.
///
/// `default` only runs when the id is missing, so a caller that names its
/// account never needs a session for it.
pub fn with_default_account_id<A, F>(mut args: A, default: F) -> JmapResult<A>
where
    A: AccountScoped,
    F: FnOnce() -> JmapResult<String>,
{
    if args.account_id().is_none() {
        args.set_account_id(default()?);
    }
    Ok(args)
}

jmap_method!(MailboxGet, "Mailbox/get", GetArguments => GetResponse<Mailbox>);
jmap_method!(MailboxChanges, "Mailbox/changes", ChangesArguments => ChangesResponse);
jmap_method!(MailboxQuery, "Mailbox/query", MailboxQueryArguments => QueryResponse);
jmap_method!(MailboxSet, "Mailbox/set", MailboxSetArguments => SetResponse<Mailbox>);
jmap_method!(EmailGet, "Email/get", EmailGetArguments => GetResponse<Email>);
jmap_method!(EmailChanges, "Email/changes", ChangesArguments => ChangesResponse);
jmap_method!(EmailQuery, "Email/query", EmailQueryArguments => QueryResponse);
jmap_method!(EmailSet, "Email/set", SetArguments<Email> => SetResponse<Email>);
jmap_method!(EmailSubmissionGet, "EmailSubmission/get", GetArguments => GetResponse<EmailSubmission>);
jmap_method!(EmailSubmissionChanges, "EmailSubmission/changes", ChangesArguments => ChangesResponse);
jmap_method!(EmailSubmissionSet, "EmailSubmission/set", EmailSubmissionSetArguments => SetResponse<EmailSubmission>);
jmap_method!(IdentityGet, "Identity/get", GetArguments => GetResponse<Identity>);
