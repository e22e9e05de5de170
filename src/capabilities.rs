// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::session::SessionState;

pub const CORE: &str = "urn:ietf:params:jmap:core";
pub const MAIL: &str = "urn:ietf:params:jmap:mail";
pub const SUBMISSION: &str = "urn:ietf:params:jmap:submission";

/// Advertised when the session is missing or lists no capabilities.
pub const DEFAULT_USING: [&str; 2] = [CORE, MAIL];

/// Capability URNs for the `using` member of the next request.
///
/// Computed per request: the answer changes once a session is fetched.
pub fn resolve_using(state: &SessionState) -> Vec<String> {
    match state {
        SessionState::Ready(session) if !session.capabilities.is_empty() => {
            session.capabilities.keys().cloned().collect()
        }
        _ => DEFAULT_USING.iter().map(|urn| urn.to_string()).collect(),
    }
}
